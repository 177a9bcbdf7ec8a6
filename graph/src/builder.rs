use crate::core::{RepoModel, TierAnchors};
use crate::error::Result;
use crate::git_backend::{HistorySource, HistoryWalker};
use crate::parse::MergeInterpreter;
use crate::propagate::propagate_tiers;
use crate::query::RecencyWindow;
use crate::render::{BranchSort, Report};
use tracing::info;

/// Default number of commits kept in a report
pub const DEFAULT_WINDOW: usize = 100;

/// Builder for the branch/tier report of a repository
pub struct ReportBuilder<'s, S: HistorySource + ?Sized> {
    source: &'s S,
    anchors: TierAnchors,
    window: usize,
    per_branch_limit: Option<usize>,
    no_merges: bool,
    refresh: bool,
    include_tags: bool,
    sort: BranchSort,
}

impl<'s, S: HistorySource + ?Sized> ReportBuilder<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self {
            source,
            anchors: TierAnchors::default(),
            window: DEFAULT_WINDOW,
            per_branch_limit: None,
            no_merges: false,
            refresh: true,
            include_tags: true,
            sort: BranchSort::Name,
        }
    }

    /// Set the anchor branch names
    pub fn anchors(mut self, anchors: TierAnchors) -> Self {
        self.anchors = anchors;
        self
    }

    /// Set how many of the most recent commits are kept
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the log limit per branch; defaults to the window size
    pub fn per_branch_limit(mut self, limit: Option<usize>) -> Self {
        self.per_branch_limit = limit;
        self
    }

    /// Leave merge commits out of every log
    pub fn no_merges(mut self, no_merges: bool) -> Self {
        self.no_merges = no_merges;
        self
    }

    /// Sync with remotes before reading
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Add a marker column per tag
    pub fn include_tags(mut self, include: bool) -> Self {
        self.include_tags = include;
        self
    }

    /// Set the order of non-anchor branches
    pub fn sort(mut self, sort: BranchSort) -> Self {
        self.sort = sort;
        self
    }

    /// Load, propagate, tag, rank and window the model
    pub fn build_model(&self) -> Result<RepoModel> {
        let walker = HistoryWalker::new(self.source)
            .per_branch_limit(Some(self.per_branch_limit.unwrap_or(self.window)))
            .no_merges(self.no_merges)
            .refresh(self.refresh);

        let mut model = walker.into_model(self.anchors.clone())?;
        propagate_tiers(&mut model, &MergeInterpreter::from_anchors(&self.anchors));

        if self.include_tags {
            let tags = walker.load_tags(&mut model);
            info!(tags, "tag markers added");
        }

        RecencyWindow::new(self.window).apply(&mut model);
        Ok(model)
    }

    /// Build the report
    pub fn build(&self) -> Result<Report> {
        let model = self.build_model()?;
        Ok(Report::build(&model, self.sort))
    }
}
