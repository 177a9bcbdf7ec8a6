use super::grammar::{parse_branch_listing, parse_parents_line, parse_tag_listing};
use super::source::{HistorySource, LogQuery};
use crate::core::BranchRef;
use crate::error::{GraphError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::trace;

/// [HistorySource] backed by the `git` executable
pub struct GitCli {
    program: PathBuf,
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(work_dir: impl AsRef<Path>) -> Self {
        Self {
            program: PathBuf::from("git"),
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    /// Use a specific git executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.work_dir);
        // Keep output machine-readable regardless of user config
        cmd.args(["-c", "color.ui=false", "-c", "core.quotePath=false"]);
        cmd
    }

    /// Run git and return stdout; a non-zero exit is a query failure
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        trace!(%command, "running");

        let output = self
            .git_cmd()
            .args(args)
            .output()
            .map_err(|source| GraphError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GraphError::QueryFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl HistorySource for GitCli {
    fn refresh(&self) -> Result<()> {
        self.run(&["fetch", "-p"]).map(|_| ())
    }

    fn branches(&self) -> Result<Vec<BranchRef>> {
        let output = self.run(&["branch", "-a"])?;
        Ok(parse_branch_listing(&output))
    }

    fn log(&self, branch: &BranchRef, query: LogQuery) -> Result<Vec<String>> {
        let revision = branch.revision();
        let limit = query.max_count.map(|n| n.to_string());

        let mut args = vec!["log", "--date=raw", "--no-decorate"];
        if query.no_merges {
            args.push("--no-merges");
        }
        if let Some(limit) = &limit {
            args.push("-n");
            args.push(limit);
        }
        args.push(&revision);
        args.push("--");

        let output = self.run(&args)?;
        Ok(output.lines().map(str::to_string).collect())
    }

    fn parents(&self, commit_id: &str) -> Result<Vec<String>> {
        let output = self.run(&["rev-list", "--parents", "-n", "1", commit_id])?;
        if output.trim().is_empty() {
            return Err(GraphError::Malformed {
                command: format!("git rev-list --parents -n 1 {}", commit_id),
                detail: "empty output".to_string(),
            });
        }
        Ok(parse_parents_line(&output))
    }

    fn tags(&self) -> Result<Vec<String>> {
        let output = self.run(&["tag"])?;
        Ok(parse_tag_listing(&output))
    }

    fn tag_target(&self, tag: &str) -> Result<String> {
        let revision = format!("{}^{{commit}}", tag);
        let output = self.run(&["rev-parse", "--verify", "--quiet", &revision])?;
        let target = output.trim();
        if target.is_empty() {
            return Err(GraphError::Malformed {
                command: format!("git rev-parse --verify --quiet {}", revision),
                detail: "no commit id".to_string(),
            });
        }
        Ok(target.to_string())
    }
}
