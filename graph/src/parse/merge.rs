//! Heuristic reading of merge commit summaries.
//!
//! Two message shapes are understood:
//!
//! - `Merge branch '<source>' [of <url>] [into <target>]`, written by
//!   `git merge` and `git pull`
//! - `Merge pull request #<n> from <source>`, written by GitHub
//!
//! Anything else yields nothing; those merges are left to the generic
//! ancestry rules of the propagator.

use crate::core::TierAnchors;

const MERGE_BRANCH: &str = "Merge branch '";
const MERGE_PULL_REQUEST: &str = "Merge pull request";

/// Branches named by a merge message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRoute {
    /// Branch merged into; `None` when the message does not say
    pub target: Option<String>,
    /// Branch merged from
    pub source: Option<String>,
}

/// Reads merge summaries against a remote name and a default target
#[derive(Debug, Clone)]
pub struct MergeInterpreter {
    remote: String,
    default_target: String,
}

impl MergeInterpreter {
    pub fn new(remote: impl Into<String>, default_target: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            default_target: default_target.into(),
        }
    }

    pub fn from_anchors(anchors: &TierAnchors) -> Self {
        Self::new(anchors.remote.clone(), anchors.default_merge_target())
    }

    /// Extract the target and source branch from a merge summary
    pub fn interpret(&self, summary: &str) -> Option<MergeRoute> {
        let summary = summary.trim();
        if let Some(rest) = summary.strip_prefix(MERGE_BRANCH) {
            return self.merge_branch(rest);
        }
        if summary.starts_with(MERGE_PULL_REQUEST) {
            let source = summary.split_whitespace().last()?;
            return Some(MergeRoute {
                target: None,
                source: Some(source.to_string()),
            });
        }
        None
    }

    fn merge_branch(&self, rest: &str) -> Option<MergeRoute> {
        let end = rest.find('\'')?;
        let name = &rest[..end];
        let tail = &rest[end + 1..];

        // `'x' of <url>` came from another repository's branch
        let source = if tail.starts_with(" of") {
            format!("{}/{}", self.remote, name)
        } else {
            name.to_string()
        };

        // No `into` clause means the current branch, assumed to be the
        // default one. Local and remote-tracking stay indistinguishable.
        let target = match tail.find("into ") {
            Some(idx) => tail[idx + "into ".len()..].trim().to_string(),
            None => self.default_target.clone(),
        };

        Some(MergeRoute {
            target: Some(target).filter(|t| !t.is_empty()),
            source: Some(source).filter(|_| !name.is_empty()),
        })
    }
}

impl Default for MergeInterpreter {
    fn default() -> Self {
        Self::from_anchors(&TierAnchors::default())
    }
}

/// Read a merge summary with the default `origin` remote and `master` target
pub fn interpret_merge_message(summary: &str) -> Option<MergeRoute> {
    MergeInterpreter::default().interpret(summary)
}
