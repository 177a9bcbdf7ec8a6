use serde::Serialize;

/// An edge from a commit to one of its parents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Child commit ID
    pub from: String,
    /// Parent commit ID
    pub to: String,
    pub edge_type: EdgeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// First-parent link
    Mainline,
    /// Link from a merge commit to a merged-in parent
    Merge,
}

impl Edge {
    pub fn mainline(from: String, to: String) -> Self {
        Self {
            from,
            to,
            edge_type: EdgeType::Mainline,
        }
    }

    pub fn merge(from: String, to: String) -> Self {
        Self {
            from,
            to,
            edge_type: EdgeType::Merge,
        }
    }
}
