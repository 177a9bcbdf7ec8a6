pub mod node;
pub mod edge;
pub mod branch;
pub mod tier;
pub mod dag;

pub use node::{Commit, Parents};
pub use edge::{Edge, EdgeType};
pub use branch::{Branch, BranchRef};
pub use tier::{Tier, TierAnchors};
pub use dag::{RepoModel, ModelStats};
