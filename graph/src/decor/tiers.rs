use crate::core::{Branch, Commit, RepoModel, Tier};
use std::collections::HashMap;

/// Classifies commits and branches against the anchor branches
pub struct TierDecorator<'m> {
    model: &'m RepoModel,
    /// Reference branch name per anchor tier, strongest first
    references: Vec<(Tier, String)>,
}

impl<'m> TierDecorator<'m> {
    pub fn new(model: &'m RepoModel) -> Self {
        let anchors = model.anchors();
        let references = Tier::ANCHORED
            .iter()
            .filter_map(|&tier| anchors.reference(tier).map(|name| (tier, name)))
            .collect();
        Self { model, references }
    }

    /// Tier of a single commit: the strongest anchor that holds it, either
    /// by log membership or by a propagated name
    pub fn commit_tier(&self, commit: &Commit) -> Tier {
        for (tier, reference) in &self.references {
            let in_log = self
                .model
                .branch(reference)
                .is_some_and(|anchor| anchor.contains(&commit.id));
            if in_log || commit.tier_set.contains(reference) {
                return *tier;
            }
        }
        Tier::Untracked
    }

    /// Weakest tier among a branch's commits. A branch with no commits left
    /// stays at the strongest tier.
    pub fn branch_tier(&self, branch: &Branch) -> Tier {
        branch
            .commits
            .iter()
            .filter_map(|id| self.model.commit(id))
            .map(|commit| self.commit_tier(commit))
            .fold(Tier::Production, Tier::min)
    }

    /// Tier of every branch, by name
    pub fn branch_tiers(&self) -> HashMap<String, Tier> {
        self.model
            .branches()
            .map(|branch| (branch.name.clone(), self.branch_tier(branch)))
            .collect()
    }
}
