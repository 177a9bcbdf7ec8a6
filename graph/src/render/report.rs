use crate::core::{Edge, RepoModel, Tier};
use crate::decor::TierDecorator;
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::collections::HashSet;

/// Order of the non-anchor branch rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BranchSort {
    /// By display label
    #[default]
    Name,
    /// By latest commit time, stalest first
    Date,
}

/// One column of the grid
#[derive(Debug, Clone, Serialize)]
pub struct CommitRow {
    pub id: String,
    pub short_id: String,
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
    pub author: String,
    pub description: String,
    pub is_tag: bool,
    pub is_merge: bool,
    pub rank: usize,
    pub tier: Tier,
}

/// One row of the grid
#[derive(Debug, Clone, Serialize)]
pub struct BranchRow {
    pub name: String,
    pub display: String,
    pub is_local: bool,
    pub is_anchor: bool,
    pub tier: Tier,
    /// Rank of the branch's newest commit, if it is still in the window
    pub latest_rank: Option<usize>,
    /// Per commit column: `None` when the branch does not hold the commit
    pub cells: Vec<Option<Tier>>,
}

/// Everything a renderer needs, in display order
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub commits: Vec<CommitRow>,
    pub branches: Vec<BranchRow>,
    /// Anchor branch names, remote before local, strongest tier first
    pub anchors: Vec<String>,
    /// Parent links between commits in the window
    pub edges: Vec<Edge>,
}

pub fn format_timestamp(seconds: i64) -> String {
    Local
        .timestamp_opt(seconds, 0)
        .single()
        .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

impl Report {
    /// Build the report of a ranked and windowed model
    pub fn build(model: &RepoModel, sort: BranchSort) -> Self {
        let decorator = TierDecorator::new(model);

        let commits: Vec<CommitRow> = model
            .commits()
            .iter()
            .enumerate()
            .map(|(position, commit)| CommitRow {
                id: commit.id.clone(),
                short_id: commit.short_id().to_string(),
                timestamp: format_timestamp(commit.authored_time),
                author: commit.author.clone(),
                description: commit.description.clone(),
                is_tag: commit.is_tag,
                is_merge: commit.is_merge(),
                rank: commit.recency_rank.unwrap_or(position),
                tier: decorator.commit_tier(commit),
            })
            .collect();

        let anchors = model.anchors().display_order();
        let anchor_set: HashSet<&str> = anchors.iter().map(String::as_str).collect();

        let mut ordered: Vec<_> = anchors
            .iter()
            .filter_map(|name| model.branch(name))
            .filter(|b| !b.is_placeholder)
            .collect();
        let mut others: Vec<_> = model
            .branches()
            .filter(|b| !b.is_placeholder && !anchor_set.contains(b.name.as_str()))
            .collect();
        match sort {
            BranchSort::Name => others.sort_by(|a, b| a.display.cmp(&b.display)),
            BranchSort::Date => others.sort_by_key(|b| {
                b.latest_commit
                    .as_deref()
                    .and_then(|id| model.commit(id))
                    .map_or(0, |c| c.authored_time)
            }),
        }
        ordered.extend(others);

        let branches = ordered
            .into_iter()
            .map(|branch| BranchRow {
                name: branch.name.clone(),
                display: branch.display.clone(),
                is_local: branch.is_local,
                is_anchor: anchor_set.contains(branch.name.as_str()),
                tier: decorator.branch_tier(branch),
                latest_rank: branch
                    .latest_commit
                    .as_deref()
                    .and_then(|id| model.commit(id))
                    .and_then(|c| c.recency_rank),
                cells: commits
                    .iter()
                    .map(|row| branch.contains(&row.id).then_some(row.tier))
                    .collect(),
            })
            .collect();

        Self {
            commits,
            branches,
            anchors,
            edges: model.edges(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BranchRef, Commit};
    use crate::query::RecencyWindow;
    use pretty_assertions::assert_eq;

    fn model() -> RepoModel {
        let mut model = RepoModel::default();
        for reference in [
            BranchRef::local("zeta"),
            BranchRef::local("alpha"),
            BranchRef::local("master"),
            BranchRef::remote("origin/master"),
        ] {
            model.add_branch(&reference);
        }
        for (id, time) in [("c3", 300), ("c2", 200), ("c1", 100)] {
            let mut commit = Commit::new(id);
            commit.authored_time = time;
            model.insert_commit(commit);
        }
        for (branch, id) in [
            ("alpha", "c3"),
            ("alpha", "c1"),
            ("zeta", "c2"),
            ("zeta", "c1"),
            ("master", "c1"),
            ("origin/master", "c1"),
        ] {
            model.record_membership(branch, id);
        }
        model.note_branch_name("ghost");
        // named only by a merge message, never listed
        model.note_branch_name("origin/staging");
        RecencyWindow::new(10).apply(&mut model);
        model
    }

    fn names(report: &Report) -> Vec<&str> {
        report.branches.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_anchor_rows_first_then_by_name() {
        let report = Report::build(&model(), BranchSort::Name);
        assert_eq!(names(&report), vec!["origin/master", "master", "alpha", "zeta"]);
        assert!(report.branches[0].is_anchor);
        assert_eq!(report.branches[0].display, "master (origin)");
    }

    #[test]
    fn test_sort_by_date_puts_stale_first() {
        let report = Report::build(&model(), BranchSort::Date);
        assert_eq!(names(&report), vec!["origin/master", "master", "zeta", "alpha"]);

        // a latest commit outside the window counts as time 0
        let mut model = model();
        RecencyWindow::new(1).apply(&mut model);
        let report = Report::build(&model, BranchSort::Date);
        assert_eq!(names(&report), vec!["origin/master", "master", "zeta", "alpha"]);
        assert_eq!(report.branches[2].latest_rank, None);
    }

    #[test]
    fn test_cells_and_tiers() {
        let report = Report::build(&model(), BranchSort::Name);
        let alpha = report.branches.iter().find(|b| b.name == "alpha").unwrap();

        assert_eq!(alpha.cells, vec![Some(Tier::Untracked), None, Some(Tier::Master)]);
        assert_eq!(alpha.tier, Tier::Untracked);
        assert_eq!(alpha.latest_rank, Some(0));

        let origin_master = &report.branches[0];
        assert_eq!(origin_master.tier, Tier::Master);

        let ranks: Vec<usize> = report.commits.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
        assert_eq!(report.commits[0].timestamp.len(), 19);
    }

    #[test]
    fn test_json_shape() {
        let report = Report::build(&model(), BranchSort::Name);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["commits"][2]["tier"], 1);
        assert_eq!(json["branches"][2]["cells"][1], serde_json::Value::Null);
        assert_eq!(json["anchors"][0], "origin/production");
    }
}
