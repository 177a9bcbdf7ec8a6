//! Parent lists, child edges and boundary placeholders.

use crate::core::{Commit, Parents, RepoModel};
use crate::git_backend::HistorySource;
use tracing::{debug, warn};

/// Record `parents` on `commit_id` and link each parent back to it.
///
/// A parent no log produced becomes a boundary commit one second older
/// than the oldest commit currently known, so it always sorts last.
/// Returns the number of boundary commits created.
pub fn attach_parents(model: &mut RepoModel, commit_id: &str, parents: Vec<String>) -> usize {
    let mut created = 0;
    for parent_id in &parents {
        if !model.contains(parent_id) {
            let oldest = model.oldest_time().unwrap_or(0);
            model.insert_commit(Commit::boundary(parent_id.clone(), oldest - 1));
            created += 1;
        }
        model.link_child(parent_id, commit_id);
    }

    if let Some(commit) = model.commit_mut(commit_id) {
        commit.parents = Parents::from_vec(parents);
    }
    created
}

/// Query parents for every commit produced by a branch log.
///
/// Must run after all logs are parsed so that parents seen in any branch
/// resolve to real commits. A failed query leaves the commit parentless.
pub fn resolve_ancestry<S>(model: &mut RepoModel, source: &S) -> usize
where
    S: HistorySource + ?Sized,
{
    let queried: Vec<String> = model
        .commits()
        .iter()
        .filter(|c| !c.is_boundary && !c.is_tag)
        .map(|c| c.id.clone())
        .collect();

    let mut boundaries = 0;
    for commit_id in queried {
        match source.parents(&commit_id) {
            Ok(parents) => boundaries += attach_parents(model, &commit_id, parents),
            Err(err) => warn!(commit = %commit_id, error = %err, "parent lookup failed"),
        }
    }

    debug!(boundaries, "ancestry resolved");
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSource;

    fn model_with_times(commits: &[(&str, i64)]) -> RepoModel {
        let mut model = RepoModel::default();
        for (id, time) in commits {
            let mut commit = Commit::new(*id);
            commit.authored_time = *time;
            model.insert_commit(commit);
        }
        model
    }

    #[test]
    fn test_known_parent_gets_child_edge() {
        let mut model = model_with_times(&[("b", 200), ("a", 100)]);
        let created = attach_parents(&mut model, "b", vec!["a".to_string()]);

        assert_eq!(created, 0);
        assert_eq!(model.commit("b").unwrap().parents.as_slice(), ["a".to_string()]);
        assert_eq!(model.commit("a").unwrap().children, vec!["b".to_string()]);
    }

    #[test]
    fn test_unknown_parents_become_boundaries() {
        let mut model = model_with_times(&[("m", 300), ("a", 100)]);
        let created = attach_parents(&mut model, "m", vec!["x".to_string(), "y".to_string()]);

        assert_eq!(created, 2);
        let x = model.commit("x").unwrap();
        let y = model.commit("y").unwrap();
        assert!(x.is_boundary && y.is_boundary);
        assert_eq!(x.authored_time, 99);
        assert_eq!(y.authored_time, 98);
        assert_eq!(x.children, vec!["m".to_string()]);
        assert!(model.commit("m").unwrap().is_merge());
    }

    #[test]
    fn test_resolve_skips_failed_lookups() {
        let mut model = model_with_times(&[("c", 300), ("b", 200), ("a", 100)]);
        let source = FakeSource::new()
            .with_parents("c", &["b"])
            .with_parents("a", &["outside"]);

        let boundaries = resolve_ancestry(&mut model, &source);

        assert_eq!(boundaries, 1);
        assert!(model.commit("b").unwrap().parents.is_empty());
        assert_eq!(model.commit("b").unwrap().children, vec!["c".to_string()]);
        assert!(model.commit("outside").unwrap().is_boundary);
        // boundaries are not queried themselves
        assert_eq!(source.parent_queries(), 3);
    }
}
