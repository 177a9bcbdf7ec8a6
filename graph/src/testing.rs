//! In-memory [HistorySource] for unit tests.

use crate::core::BranchRef;
use crate::error::{GraphError, Result};
use crate::git_backend::{HistorySource, LogQuery};
use std::cell::Cell;
use std::collections::HashMap;

/// One entry of a fake branch log: id, author time, subject
pub type Entry<'a> = (&'a str, i64, &'a str);

#[derive(Default)]
pub struct FakeSource {
    branches: Vec<BranchRef>,
    logs: HashMap<String, Vec<String>>,
    parents: HashMap<String, Vec<String>>,
    tags: Vec<(String, Option<String>)>,
    fail_branches: bool,
    fail_refresh: bool,
    parent_queries: Cell<usize>,
    log_queries: Cell<usize>,
}

fn failure(command: &str) -> GraphError {
    GraphError::QueryFailed {
        command: command.to_string(),
        stderr: "fatal: simulated".to_string(),
    }
}

/// Render entries the way `git log --date=raw` prints them
pub fn log_text(entries: &[Entry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (id, time, subject) in entries {
        lines.push(format!("commit {}", id));
        lines.push("Author: Tester <tester@example.com>".to_string());
        lines.push(format!("Date:   {} +0000", time));
        lines.push(String::new());
        lines.push(format!("    {}", subject));
        lines.push(String::new());
    }
    lines
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a branch whose log prints `entries`, newest first
    pub fn with_branch(mut self, reference: BranchRef, entries: &[Entry]) -> Self {
        self.logs.insert(reference.name.clone(), log_text(entries));
        self.branches.push(reference);
        self
    }

    /// Add a branch whose log query fails
    pub fn with_broken_branch(mut self, reference: BranchRef) -> Self {
        self.branches.push(reference);
        self
    }

    pub fn with_parents(mut self, commit_id: &str, parents: &[&str]) -> Self {
        self.parents.insert(
            commit_id.to_string(),
            parents.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    pub fn with_tag(mut self, name: &str, target: Option<&str>) -> Self {
        self.tags.push((name.to_string(), target.map(str::to_string)));
        self
    }

    pub fn failing_branches(mut self) -> Self {
        self.fail_branches = true;
        self
    }

    pub fn failing_refresh(mut self) -> Self {
        self.fail_refresh = true;
        self
    }

    pub fn parent_queries(&self) -> usize {
        self.parent_queries.get()
    }

    pub fn log_queries(&self) -> usize {
        self.log_queries.get()
    }
}

impl HistorySource for FakeSource {
    fn refresh(&self) -> Result<()> {
        if self.fail_refresh {
            return Err(failure("git fetch -p"));
        }
        Ok(())
    }

    fn branches(&self) -> Result<Vec<BranchRef>> {
        if self.fail_branches {
            return Err(failure("git branch -a"));
        }
        Ok(self.branches.clone())
    }

    fn log(&self, branch: &BranchRef, query: LogQuery) -> Result<Vec<String>> {
        self.log_queries.set(self.log_queries.get() + 1);
        let lines = self
            .logs
            .get(&branch.name)
            .ok_or_else(|| failure("git log"))?;
        // `-n` counts commits, each fake entry spans six lines
        let limit = query.max_count.map_or(lines.len(), |n| n * 6);
        Ok(lines.iter().take(limit).cloned().collect())
    }

    fn parents(&self, commit_id: &str) -> Result<Vec<String>> {
        self.parent_queries.set(self.parent_queries.get() + 1);
        self.parents
            .get(commit_id)
            .cloned()
            .ok_or_else(|| failure("git rev-list"))
    }

    fn tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.iter().map(|(name, _)| name.clone()).collect())
    }

    fn tag_target(&self, tag: &str) -> Result<String> {
        self.tags
            .iter()
            .find(|(name, _)| name == tag)
            .and_then(|(_, target)| target.clone())
            .ok_or_else(|| failure("git rev-parse"))
    }
}
