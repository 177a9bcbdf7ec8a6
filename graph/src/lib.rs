pub mod ancestry;
pub mod builder;
pub mod core;
pub mod decor;
pub mod error;
pub mod git_backend;
pub mod parse;
pub mod propagate;
pub mod query;
pub mod render;

#[cfg(test)]
mod testing;

pub use builder::{ReportBuilder, DEFAULT_WINDOW};
pub use core::{Branch, BranchRef, Commit, Edge, EdgeType, ModelStats, RepoModel, Tier, TierAnchors};
pub use error::{GraphError, Result};
pub use git_backend::{GitCli, HistorySource, HistoryWalker, LogQuery};
pub use parse::{MergeInterpreter, MergeRoute};
pub use render::{render_html, render_text, BranchSort, Report};
