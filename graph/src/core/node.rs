use smallvec::SmallVec;
use std::collections::BTreeSet;

/// Parent ids of a commit; two entries mark a merge
pub type Parents = SmallVec<[String; 2]>;

/// A commit in the repository model
#[derive(Debug, Clone, Default)]
pub struct Commit {
    /// Full commit hash, or the tag name for tag markers
    pub id: String,
    /// Author time in seconds since the epoch
    pub authored_time: i64,
    /// Author line, `<` and `>` escaped
    pub author: String,
    /// Description lines, HTML-escaped and joined with `<br />`
    pub description: String,
    /// Raw first description line, used to read merge messages
    pub subject: String,
    /// Branch names this commit is known to belong to
    pub tier_set: BTreeSet<String>,
    /// Parent ids in the order git lists them
    pub parents: Parents,
    /// Ids of commits listing this one as a parent
    pub children: Vec<String>,
    /// Position in the newest-first ordering, assigned by the window pass
    pub recency_rank: Option<usize>,
    /// Placeholder for a parent that no queried log produced
    pub is_boundary: bool,
    /// Marker row standing in for a tag
    pub is_tag: bool,
}

impl Commit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Placeholder for a parent outside every queried window
    pub fn boundary(id: impl Into<String>, authored_time: i64) -> Self {
        Self {
            id: id.into(),
            authored_time,
            is_boundary: true,
            ..Self::default()
        }
    }

    /// Tag marker sorted directly above its target
    pub fn tag(name: impl Into<String>, target: &Commit) -> Self {
        Self {
            id: name.into(),
            authored_time: target.authored_time + 1,
            description: format!("TAG to {}", target.id),
            is_tag: true,
            ..Self::default()
        }
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Abbreviated id shown in report headers
    pub fn short_id(&self) -> &str {
        if self.is_tag {
            return &self.id;
        }
        match self.id.char_indices().nth(5) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }

    pub(crate) fn add_child(&mut self, child_id: &str) {
        if !self.children.iter().any(|c| c == child_id) {
            self.children.push(child_id.to_string());
        }
    }
}
