//! Recency ranking and the commit window.

use crate::core::RepoModel;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    pub kept: usize,
    pub dropped: usize,
}

/// Keeps the `size` most recent commits of a model
#[derive(Debug, Clone, Copy)]
pub struct RecencyWindow {
    size: usize,
}

impl RecencyWindow {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Sort commits newest first, number them from 0, then drop every
    /// commit ranked at or past the window from the model and from every
    /// branch's membership.
    ///
    /// Must run after propagation: dropped commits may already have passed
    /// their tier names on to commits that stay.
    pub fn apply(&self, model: &mut RepoModel) -> WindowStats {
        let mut commits = model.take_commits();
        // stable, so equal times keep insertion order
        commits.sort_by(|a, b| b.authored_time.cmp(&a.authored_time));
        for (rank, commit) in commits.iter_mut().enumerate() {
            commit.recency_rank = Some(rank);
        }

        let total = commits.len();
        commits.truncate(self.size);
        let stats = WindowStats {
            kept: commits.len(),
            dropped: total - commits.len(),
        };
        model.replace_commits(commits);

        debug!(kept = stats.kept, dropped = stats.dropped, "window applied");
        stats
    }
}
