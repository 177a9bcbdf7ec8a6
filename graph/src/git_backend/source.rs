use crate::core::BranchRef;
use crate::error::Result;

/// Options of a per-branch log query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// `-n` limit
    pub max_count: Option<usize>,
    /// `--no-merges`
    pub no_merges: bool,
}

/// The version-control tool as seen by the model builder.
///
/// Every method maps to one query. Implementations return raw log lines so
/// the text grammar is parsed in one place.
pub trait HistorySource {
    /// Best-effort sync with remotes before anything is read
    fn refresh(&self) -> Result<()>;

    /// Local and remote-tracking branches, without symbolic `HEAD` pointers
    fn branches(&self) -> Result<Vec<BranchRef>>;

    /// `git log --date=raw` output for one branch, one entry per line
    fn log(&self, branch: &BranchRef, query: LogQuery) -> Result<Vec<String>>;

    /// Parent ids of a commit, mainline first
    fn parents(&self, commit_id: &str) -> Result<Vec<String>>;

    /// Tag names
    fn tags(&self) -> Result<Vec<String>>;

    /// Commit id a tag points at
    fn tag_target(&self, tag: &str) -> Result<String>;
}
