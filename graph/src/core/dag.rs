use super::{
    branch::{Branch, BranchRef},
    edge::Edge,
    node::Commit,
    tier::TierAnchors,
};
use std::collections::{BTreeSet, HashMap};

/// In-memory graph of commits and branches.
///
/// Commits live in an arena kept in insertion order; every cross reference
/// (parents, children, branch membership) is a commit id resolved through
/// the index.
#[derive(Debug, Clone)]
pub struct RepoModel {
    commits: Vec<Commit>,
    index: HashMap<String, usize>,
    branches: Vec<Branch>,
    branch_index: HashMap<String, usize>,
    /// Every branch name seen, including ones only named by merge messages
    branch_names: BTreeSet<String>,
    anchors: TierAnchors,
}

impl RepoModel {
    pub fn new(anchors: TierAnchors) -> Self {
        Self {
            commits: Vec::new(),
            index: HashMap::new(),
            branches: Vec::new(),
            branch_index: HashMap::new(),
            branch_names: BTreeSet::new(),
            anchors,
        }
    }

    pub fn anchors(&self) -> &TierAnchors {
        &self.anchors
    }

    /// Register a branch from the branch listing. Returns false if the
    /// name is already known.
    pub fn add_branch(&mut self, reference: &BranchRef) -> bool {
        self.branch_names.insert(reference.name.clone());
        if self.branch_index.contains_key(&reference.name) {
            return false;
        }
        self.branch_index
            .insert(reference.name.clone(), self.branches.len());
        self.branches.push(Branch::new(reference));
        true
    }

    /// Record a branch name read from a merge message, materializing a
    /// placeholder entry when no listed branch carries it
    pub fn note_branch_name(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.branch_names.insert(name.to_string());
        if !self.branch_index.contains_key(name) {
            self.branch_index.insert(name.to_string(), self.branches.len());
            self.branches.push(Branch::placeholder(name));
        }
    }

    /// Drop a branch whose log could not be read
    pub fn remove_branch(&mut self, name: &str) -> Option<Branch> {
        let idx = self.branch_index.remove(name)?;
        let branch = self.branches.remove(idx);
        for slot in self.branch_index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(branch)
    }

    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branch_index.get(name).map(|&idx| &self.branches[idx])
    }

    pub fn branch_mut(&mut self, name: &str) -> Option<&mut Branch> {
        self.branch_index
            .get(name)
            .copied()
            .map(move |idx| &mut self.branches[idx])
    }

    /// Branches in discovery order
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    pub fn branch_names(&self) -> &BTreeSet<String> {
        &self.branch_names
    }

    /// Insert a commit unless its id is already known. The first writer
    /// keeps its metadata.
    pub fn insert_commit(&mut self, commit: Commit) -> bool {
        if self.index.contains_key(&commit.id) {
            return false;
        }
        self.index.insert(commit.id.clone(), self.commits.len());
        self.commits.push(commit);
        true
    }

    pub fn contains(&self, commit_id: &str) -> bool {
        self.index.contains_key(commit_id)
    }

    pub fn commit(&self, commit_id: &str) -> Option<&Commit> {
        self.index.get(commit_id).map(|&idx| &self.commits[idx])
    }

    pub fn commit_mut(&mut self, commit_id: &str) -> Option<&mut Commit> {
        self.index
            .get(commit_id)
            .copied()
            .map(move |idx| &mut self.commits[idx])
    }

    /// Commits in insertion order, or rank order once the window ran
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn commit_ids(&self) -> Vec<String> {
        self.commits.iter().map(|c| c.id.clone()).collect()
    }

    /// Oldest author time in the model
    pub fn oldest_time(&self) -> Option<i64> {
        self.commits.iter().map(|c| c.authored_time).min()
    }

    /// Mark `commit_id` as produced by `branch`'s log
    pub fn record_membership(&mut self, branch: &str, commit_id: &str) {
        if let Some(branch) = self.branch_mut(branch) {
            if branch.latest_commit.is_none() {
                branch.latest_commit = Some(commit_id.to_string());
            }
            branch.commits.insert(commit_id.to_string());
        }
    }

    /// Add a child edge if the parent is known
    pub fn link_child(&mut self, parent_id: &str, child_id: &str) -> bool {
        match self.commit_mut(parent_id) {
            Some(parent) => {
                parent.add_child(child_id);
                true
            }
            None => false,
        }
    }

    /// Add a branch name to a commit's tier set
    pub fn tag_commit(&mut self, commit_id: &str, branch: &str) {
        if let Some(commit) = self.commit_mut(commit_id) {
            commit.tier_set.insert(branch.to_string());
        }
    }

    /// Replace the commit arena, keeping only `commits`, and drop every
    /// branch membership that no longer resolves
    pub(crate) fn replace_commits(&mut self, commits: Vec<Commit>) {
        self.index = commits
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.id.clone(), idx))
            .collect();
        self.commits = commits;

        let index = &self.index;
        for branch in &mut self.branches {
            branch.commits.retain(|id| index.contains_key(id));
        }
    }

    /// Take the commit arena out, leaving the model empty of commits
    pub(crate) fn take_commits(&mut self) -> Vec<Commit> {
        self.index.clear();
        std::mem::take(&mut self.commits)
    }

    /// Parent links between commits that are both still in the model
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for commit in &self.commits {
            for (position, parent_id) in commit.parents.iter().enumerate() {
                if !self.contains(parent_id) {
                    continue;
                }
                let edge = if position == 0 {
                    Edge::mainline(commit.id.clone(), parent_id.clone())
                } else {
                    Edge::merge(commit.id.clone(), parent_id.clone())
                };
                edges.push(edge);
            }
        }
        edges
    }

    /// Count of commits
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Get statistics about the model
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            total_commits: self.commits.len(),
            merge_commits: self.commits.iter().filter(|c| c.is_merge()).count(),
            boundary_commits: self.commits.iter().filter(|c| c.is_boundary).count(),
            tag_markers: self.commits.iter().filter(|c| c.is_tag).count(),
            branches: self.branches.len(),
            placeholder_branches: self.branches.iter().filter(|b| b.is_placeholder).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStats {
    pub total_commits: usize,
    pub merge_commits: usize,
    pub boundary_commits: usize,
    pub tag_markers: usize,
    pub branches: usize,
    pub placeholder_branches: usize,
}

impl Default for RepoModel {
    fn default() -> Self {
        Self::new(TierAnchors::default())
    }
}
