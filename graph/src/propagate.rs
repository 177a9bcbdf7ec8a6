//! Spreads branch and tier names from merge points and tips onto ancestors.
//!
//! One pass over the commits, newest first. This approximates reachability
//! rather than computing it: a name only travels along first-parent links,
//! and across a fork only anchor names travel.

use crate::core::RepoModel;
use crate::parse::{MergeInterpreter, MergeRoute};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Merge commits whose message named their branches
    pub routed_merges: usize,
    /// Parents whose tier set grew
    pub updated_parents: usize,
}

/// Commit ids sorted newest first; ties keep model order
fn newest_first(model: &RepoModel) -> Vec<String> {
    let mut order: Vec<(i64, String)> = model
        .commits()
        .iter()
        .map(|c| (c.authored_time, c.id.clone()))
        .collect();
    order.sort_by(|a, b| b.0.cmp(&a.0));
    order.into_iter().map(|(_, id)| id).collect()
}

fn extend(model: &mut RepoModel, commit_id: &str, names: &BTreeSet<String>) -> bool {
    match model.commit_mut(commit_id) {
        Some(commit) => {
            let before = commit.tier_set.len();
            commit.tier_set.extend(names.iter().cloned());
            commit.tier_set.len() != before
        }
        None => false,
    }
}

/// Apply what a merge message says about the merge's two parents
fn apply_route(
    model: &mut RepoModel,
    merge_id: &str,
    parents: &[String],
    route: &MergeRoute,
    tier_set: &BTreeSet<String>,
) -> usize {
    let mut updated = 0;

    if let Some(mainline) = parents.first().filter(|p| model.contains(p)) {
        match &route.target {
            Some(target) => {
                let names = BTreeSet::from([target.clone()]);
                extend(model, merge_id, &names);
                updated += usize::from(extend(model, mainline, &names));
            }
            None => updated += usize::from(extend(model, mainline, tier_set)),
        }
    }

    if let (Some(feature), Some(source)) = (parents.get(1), &route.source) {
        let is_real = model.commit(feature).is_some_and(|c| !c.is_boundary);
        if is_real {
            let names = BTreeSet::from([source.clone()]);
            updated += usize::from(extend(model, feature, &names));
        }
    }
    updated
}

/// Copy names onto the mainline parent of a commit without a route
fn apply_generic(model: &mut RepoModel, mainline: &str, tier_set: &BTreeSet<String>) -> bool {
    let Some(parent) = model.commit(mainline) else {
        return false;
    };

    let names: BTreeSet<String> = match parent.children.len() {
        1 if parent.tier_set.is_empty() => tier_set.clone(),
        // a fork: only anchors may cross, feature names would taint
        // branches that merely share history
        2 => {
            let anchors = model.anchors();
            tier_set
                .iter()
                .filter(|name| anchors.is_reserved(name))
                .cloned()
                .collect()
        }
        _ => return false,
    };
    extend(model, mainline, &names)
}

/// Propagate tier names through the whole model
pub fn propagate_tiers(model: &mut RepoModel, interpreter: &MergeInterpreter) -> PropagationStats {
    let mut stats = PropagationStats::default();

    for commit_id in newest_first(model) {
        let Some(commit) = model.commit(&commit_id) else {
            continue;
        };
        let parents: Vec<String> = commit.parents.to_vec();
        let tier_set = commit.tier_set.clone();
        let route = if parents.len() == 2 {
            interpreter.interpret(&commit.subject)
        } else {
            None
        };

        match route {
            Some(route) => {
                for name in route.target.iter().chain(route.source.iter()) {
                    model.note_branch_name(name);
                }
                stats.routed_merges += 1;
                stats.updated_parents += apply_route(model, &commit_id, &parents, &route, &tier_set);
            }
            None => {
                if let Some(mainline) = parents.first() {
                    if apply_generic(model, mainline, &tier_set) {
                        stats.updated_parents += 1;
                    }
                }
            }
        }
    }

    debug!(
        routed = stats.routed_merges,
        updated = stats.updated_parents,
        "tiers propagated"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::attach_parents;
    use crate::core::{BranchRef, Commit};

    /// Build a model from (id, time, subject, parents, tier names)
    fn model(commits: &[(&str, i64, &str, &[&str], &[&str])]) -> RepoModel {
        let mut model = RepoModel::default();
        model.add_branch(&BranchRef::local("master"));
        for (id, time, subject, _, names) in commits {
            let mut commit = Commit::new(*id);
            commit.authored_time = *time;
            commit.subject = subject.to_string();
            commit.tier_set = names.iter().map(|n| n.to_string()).collect();
            model.insert_commit(commit);
        }
        for (id, _, _, parents, _) in commits {
            attach_parents(&mut model, id, parents.iter().map(|p| p.to_string()).collect());
        }
        model
    }

    fn names(model: &RepoModel, id: &str) -> Vec<String> {
        model.commit(id).unwrap().tier_set.iter().cloned().collect()
    }

    #[test]
    fn test_merge_branch_into_master() {
        let mut model = model(&[
            ("m", 300, "Merge branch 'feature' into master", &["p1", "p2"], &[]),
            ("p2", 200, "feature work", &["base"], &[]),
            ("p1", 150, "master work", &["base"], &[]),
            ("base", 100, "base", &[], &[]),
        ]);

        let stats = propagate_tiers(&mut model, &MergeInterpreter::default());

        assert_eq!(stats.routed_merges, 1);
        assert_eq!(names(&model, "m"), vec!["master"]);
        assert!(names(&model, "p1").contains(&"master".to_string()));
        assert_eq!(names(&model, "p2"), vec!["feature"]);
        assert!(model.branch("feature").unwrap().is_placeholder);
    }

    #[test]
    fn test_single_child_chain_copies_names() {
        let mut model = model(&[
            ("c", 300, "c", &["b"], &["feature-x"]),
            ("b", 200, "b", &["a"], &[]),
            ("a", 100, "a", &[], &[]),
        ]);

        propagate_tiers(&mut model, &MergeInterpreter::default());

        assert_eq!(names(&model, "b"), vec!["feature-x"]);
        assert_eq!(names(&model, "a"), vec!["feature-x"]);
    }

    #[test]
    fn test_non_empty_parent_is_not_overwritten() {
        let mut model = model(&[
            ("b", 200, "b", &["a"], &["feature-x"]),
            ("a", 100, "a", &[], &["origin/master"]),
        ]);

        propagate_tiers(&mut model, &MergeInterpreter::default());
        assert_eq!(names(&model, "a"), vec!["origin/master"]);
    }

    #[test]
    fn test_fork_only_passes_anchor_names() {
        let mut model = model(&[
            ("x", 300, "x", &["base"], &["feature-x", "origin/production"]),
            ("y", 250, "y", &["base"], &["feature-y"]),
            ("base", 100, "base", &[], &[]),
        ]);

        propagate_tiers(&mut model, &MergeInterpreter::default());
        assert_eq!(names(&model, "base"), vec!["origin/production"]);
    }

    #[test]
    fn test_pull_request_merge_passes_whole_set_to_mainline() {
        let mut model = model(&[
            ("m", 300, "Merge pull request #7 from acme/topic", &["p1", "p2"], &["origin/staging"]),
            ("p2", 200, "topic", &[], &[]),
            ("p1", 150, "mainline", &[], &[]),
        ]);

        propagate_tiers(&mut model, &MergeInterpreter::default());

        assert_eq!(names(&model, "m"), vec!["origin/staging"]);
        assert_eq!(names(&model, "p1"), vec!["origin/staging"]);
        assert_eq!(names(&model, "p2"), vec!["acme/topic"]);
    }

    #[test]
    fn test_boundary_feature_parent_is_left_alone() {
        let mut model = model(&[
            ("m", 300, "Merge branch 'feature'", &["p1", "outside"], &[]),
            ("p1", 150, "mainline", &[], &[]),
        ]);

        propagate_tiers(&mut model, &MergeInterpreter::default());

        assert!(model.commit("outside").unwrap().is_boundary);
        assert!(names(&model, "outside").is_empty());
        assert_eq!(names(&model, "p1"), vec!["master"]);
    }

    #[test]
    fn test_unrouted_merge_uses_generic_rule() {
        let mut model = model(&[
            ("m", 300, "Merge remote-tracking branch 'origin/x'", &["p1", "p2"], &["master"]),
            ("p2", 200, "x", &[], &[]),
            ("p1", 150, "mainline", &[], &[]),
        ]);

        let stats = propagate_tiers(&mut model, &MergeInterpreter::default());

        assert_eq!(stats.routed_merges, 0);
        assert_eq!(names(&model, "p1"), vec!["master"]);
        assert!(names(&model, "p2").is_empty());
    }
}
