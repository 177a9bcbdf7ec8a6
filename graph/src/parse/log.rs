//! Parser for `git log --date=raw` output.
//!
//! Each entry is a `commit <id>` header, optional `Merge:`, `Author:` and
//! `Date:` headers, then indented description lines. Headers are matched on
//! the untrimmed line so an indented description that happens to start with
//! `Date` stays part of the description.

use super::escape::{escape_angle_brackets, escape_html};
use crate::core::{Commit, RepoModel};

/// Separator placed between description lines
pub const LINE_BREAK: &str = "<br />";

/// Outcome of parsing one branch's log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSummary {
    /// Commit headers seen
    pub commits: usize,
    /// Commits that were not in the model before this log
    pub new_commits: usize,
    /// Newest commit of the log
    pub latest: Option<String>,
}

/// Streams log lines for one branch into a [RepoModel]
pub struct LogParser<'a> {
    model: &'a mut RepoModel,
    branch: String,
    current: Option<String>,
    /// The current commit was recorded by an earlier log; its lines are
    /// read but not stored
    skip: bool,
    summary: LogSummary,
}

impl<'a> LogParser<'a> {
    pub fn new(model: &'a mut RepoModel, branch: impl Into<String>) -> Self {
        Self {
            model,
            branch: branch.into(),
            current: None,
            skip: false,
            summary: LogSummary::default(),
        }
    }

    /// Feed a single line of log output
    pub fn feed(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_matches([' ', '\t']);
        if trimmed.is_empty() {
            return;
        }

        if let Some(rest) = line.strip_prefix("commit ") {
            self.start_commit(rest);
        } else if let Some(rest) = line.strip_prefix("Author:") {
            self.set_author(rest.trim());
        } else if let Some(rest) = line.strip_prefix("Date:") {
            self.set_date(rest.trim());
        } else if line.starts_with("Merge:") {
            // parents are resolved separately
        } else {
            self.push_description(trimmed);
        }
    }

    pub fn finish(self) -> LogSummary {
        self.summary
    }

    fn start_commit(&mut self, rest: &str) {
        // `git log --decorate` appends ` (HEAD -> master)`
        let Some(id) = rest.split_whitespace().next() else {
            return;
        };

        self.skip = !self.model.insert_commit(Commit::new(id));
        if !self.skip {
            self.summary.new_commits += 1;
        }
        self.summary.commits += 1;

        if self.summary.latest.is_none() {
            self.summary.latest = Some(id.to_string());
            self.model.tag_commit(id, &self.branch);
        }
        self.model.record_membership(&self.branch, id);
        self.current = Some(id.to_string());
    }

    fn set_author(&mut self, author: &str) {
        if let Some(commit) = self.writable() {
            commit.author = escape_angle_brackets(author);
        }
    }

    fn set_date(&mut self, raw: &str) {
        // `<seconds> <offset>`; an unparsable value leaves the time alone
        let seconds = raw.split_whitespace().next().and_then(|s| s.parse::<i64>().ok());
        if let (Some(seconds), Some(commit)) = (seconds, self.writable()) {
            commit.authored_time = seconds;
        }
    }

    fn push_description(&mut self, text: &str) {
        if let Some(commit) = self.writable() {
            if commit.subject.is_empty() {
                commit.subject = text.to_string();
            }
            if !commit.description.is_empty() {
                commit.description.push_str(LINE_BREAK);
            }
            commit.description.push_str(&escape_html(text));
        }
    }

    fn writable(&mut self) -> Option<&mut Commit> {
        if self.skip {
            return None;
        }
        let id = self.current.as_deref()?;
        self.model.commit_mut(id)
    }
}

/// Parse a whole log for `branch` into `model`
pub fn parse_branch_log<I, S>(model: &mut RepoModel, branch: &str, lines: I) -> LogSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = LogParser::new(model, branch);
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BranchRef;
    use pretty_assertions::assert_eq;

    const MASTER_LOG: &str = "\
commit 2222222222222222222222222222222222222222
Author: Alice <alice@example.com>
Date:   1700000200 +0100

    Fix <script> & \"quotes\"
    second line

commit 1111111111111111111111111111111111111111
Author: Bob <bob@example.com>
Date:   1700000100 -0500

    Initial commit
";

    fn model_with(branches: &[&str]) -> RepoModel {
        let mut model = RepoModel::default();
        for name in branches {
            model.add_branch(&BranchRef::local(*name));
        }
        model
    }

    #[test]
    fn test_parses_fields() {
        let mut model = model_with(&["master"]);
        let summary = parse_branch_log(&mut model, "master", MASTER_LOG.lines());

        assert_eq!(summary.commits, 2);
        assert_eq!(summary.new_commits, 2);
        assert_eq!(
            summary.latest.as_deref(),
            Some("2222222222222222222222222222222222222222")
        );

        let newest = model.commit("2222222222222222222222222222222222222222").unwrap();
        assert_eq!(newest.authored_time, 1700000200);
        assert_eq!(newest.author, "Alice &lt;alice@example.com&gt;");
        assert_eq!(
            newest.description,
            "Fix &lt;script&gt; &amp; &quot;quotes&quot;<br />second line"
        );
        assert_eq!(newest.subject, "Fix <script> & \"quotes\"");
        assert!(newest.tier_set.contains("master"));

        let oldest = model.commit("1111111111111111111111111111111111111111").unwrap();
        assert!(oldest.tier_set.is_empty());
        assert_eq!(model.branch("master").unwrap().commits.len(), 2);
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let mut model = model_with(&["master", "copy"]);
        parse_branch_log(&mut model, "master", MASTER_LOG.lines());
        let before = model.commit("2222222222222222222222222222222222222222").cloned().unwrap();

        let summary = parse_branch_log(&mut model, "copy", MASTER_LOG.lines());
        assert_eq!(summary.new_commits, 0);
        parse_branch_log(&mut model, "master", MASTER_LOG.lines());

        let after = model.commit("2222222222222222222222222222222222222222").unwrap();
        assert_eq!(after.description, before.description);
        assert_eq!(after.author, before.author);
        assert_eq!(after.authored_time, before.authored_time);
        assert_eq!(model.commit_count(), 2);
        assert!(model.branch("copy").unwrap().contains("1111111111111111111111111111111111111111"));
    }

    #[test]
    fn test_bad_date_keeps_default() {
        let mut model = model_with(&["master"]);
        let log = "commit abc\nDate:   yesterday +0000\n\n    msg\n";
        parse_branch_log(&mut model, "master", log.lines());
        assert_eq!(model.commit("abc").unwrap().authored_time, 0);
    }

    #[test]
    fn test_merge_header_and_decoration() {
        let mut model = model_with(&["master"]);
        let log = "\
commit fff (HEAD -> master, origin/master)
Merge: aaa bbb
Author: Alice <a@x>
Date:   10 +0000

    Merge branch 'feature' into master
    Date: not a header
";
        parse_branch_log(&mut model, "master", log.lines());
        let merge = model.commit("fff").unwrap();
        assert_eq!(merge.subject, "Merge branch 'feature' into master");
        assert_eq!(
            merge.description,
            "Merge branch &#x27;feature&#x27; into master<br />Date: not a header"
        );
        assert_eq!(merge.authored_time, 10);
    }

    #[test]
    fn test_lines_before_header_are_ignored() {
        let mut model = model_with(&["master"]);
        let summary = parse_branch_log(&mut model, "master", ["    stray", "", "\t"]);
        assert_eq!(summary, LogSummary::default());
        assert_eq!(model.commit_count(), 0);
    }
}
