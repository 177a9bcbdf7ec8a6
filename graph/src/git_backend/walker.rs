use super::source::{HistorySource, LogQuery};
use crate::ancestry::resolve_ancestry;
use crate::core::{Commit, RepoModel, TierAnchors};
use crate::error::Result;
use crate::parse::parse_branch_log;
use tracing::{debug, info, warn};

/// Reads branches, logs and tags from a [HistorySource] into a [RepoModel].
///
/// Queries run strictly one after another. Only the branch listing is
/// required; a failing log, parent or tag query drops that entity and the
/// walk goes on.
pub struct HistoryWalker<'s, S: HistorySource + ?Sized> {
    source: &'s S,
    query: LogQuery,
    refresh: bool,
}

impl<'s, S: HistorySource + ?Sized> HistoryWalker<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self {
            source,
            query: LogQuery::default(),
            refresh: false,
        }
    }

    /// Set the `-n` limit of each branch log
    pub fn per_branch_limit(mut self, limit: Option<usize>) -> Self {
        self.query.max_count = limit;
        self
    }

    /// Leave merge commits out of the logs
    pub fn no_merges(mut self, no_merges: bool) -> Self {
        self.query.no_merges = no_merges;
        self
    }

    /// Ask the source to sync before reading
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Build a model with every branch log parsed and ancestry resolved
    pub fn into_model(&self, anchors: TierAnchors) -> Result<RepoModel> {
        if self.refresh {
            if let Err(err) = self.source.refresh() {
                warn!(error = %err, "refresh failed, using local refs");
            }
        }

        let mut model = RepoModel::new(anchors);
        for reference in self.source.branches()? {
            model.add_branch(&reference);
        }

        self.load_logs(&mut model);
        resolve_ancestry(&mut model, self.source);

        let stats = model.stats();
        info!(
            commits = stats.total_commits,
            branches = stats.branches,
            merges = stats.merge_commits,
            boundaries = stats.boundary_commits,
            "history loaded"
        );
        Ok(model)
    }

    fn load_logs(&self, model: &mut RepoModel) {
        let references: Vec<_> = model.branches().map(|b| b.reference()).collect();

        for reference in references {
            match self.source.log(&reference, self.query) {
                Ok(lines) => {
                    let summary = parse_branch_log(model, &reference.name, &lines);
                    debug!(
                        branch = %reference.name,
                        commits = summary.commits,
                        new = summary.new_commits,
                        "parsed log"
                    );
                }
                Err(err) => {
                    // unborn or vanished ref
                    warn!(branch = %reference.name, error = %err, "skipping branch");
                    model.remove_branch(&reference.name);
                }
            }
        }
    }

    /// Insert a marker commit above the target of every tag whose target is
    /// in the model
    pub fn load_tags(&self, model: &mut RepoModel) -> usize {
        let tags = match self.source.tags() {
            Ok(tags) => tags,
            Err(err) => {
                warn!(error = %err, "tag listing failed");
                return 0;
            }
        };

        let mut added = 0;
        for tag in tags {
            let target = match self.source.tag_target(&tag) {
                Ok(target) => target,
                Err(err) => {
                    debug!(%tag, error = %err, "skipping tag");
                    continue;
                }
            };
            let Some(target) = model.commit(&target) else {
                continue;
            };
            let marker = Commit::tag(tag.as_str(), target);
            if model.insert_commit(marker) {
                added += 1;
            }
        }
        added
    }
}
