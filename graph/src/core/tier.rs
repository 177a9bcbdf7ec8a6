use serde::{Serialize, Serializer};

/// Deployment tier, ordered weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// In none of the anchor branches
    Untracked = 0,
    Master = 1,
    Staging = 2,
    Production = 3,
}

impl Tier {
    /// Anchor tiers in the order they are tested against a commit
    pub const ANCHORED: [Tier; 3] = [Tier::Production, Tier::Staging, Tier::Master];

    pub fn level(self) -> u8 {
        self as u8
    }

    /// CSS class and legend name
    pub fn class_name(self) -> &'static str {
        match self {
            Tier::Untracked => "notmerged",
            Tier::Master => "master",
            Tier::Staging => "staging",
            Tier::Production => "production",
        }
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

/// Names of the branches that act as ground truth for tiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierAnchors {
    pub remote: String,
    pub production: String,
    pub staging: String,
    pub master: String,
}

impl Default for TierAnchors {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            production: "production".to_string(),
            staging: "staging".to_string(),
            master: "master".to_string(),
        }
    }
}

impl TierAnchors {
    /// Local branch name of an anchor tier
    pub fn local(&self, tier: Tier) -> Option<&str> {
        match tier {
            Tier::Production => Some(&self.production),
            Tier::Staging => Some(&self.staging),
            Tier::Master => Some(&self.master),
            Tier::Untracked => None,
        }
    }

    /// Remote-tracking branch that decides membership of `tier`
    pub fn reference(&self, tier: Tier) -> Option<String> {
        self.local(tier)
            .map(|name| format!("{}/{}", self.remote, name))
    }

    /// Whether `name` is one of the anchors or its remote-tracking twin
    pub fn is_reserved(&self, name: &str) -> bool {
        Tier::ANCHORED.iter().any(|&tier| {
            let local = self.local(tier).unwrap_or_default();
            name == local
                || name
                    .strip_prefix(self.remote.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
                    == Some(local)
        })
    }

    /// Anchor branch names in report order, remote before local
    pub fn display_order(&self) -> Vec<String> {
        Tier::ANCHORED
            .iter()
            .flat_map(|&tier| {
                let local = self.local(tier).unwrap_or_default().to_string();
                [format!("{}/{}", self.remote, local), local]
            })
            .collect()
    }

    /// Target assumed when a merge message names none; cannot tell the
    /// local branch from its remote-tracking twin
    pub fn default_merge_target(&self) -> &str {
        &self.master
    }
}
