use super::*;

mod failing_nodes;
mod quorum_slices;
mod reachability;
mod strongly_connected_components;
mod transitive_quorum_set;

pub use failing_nodes::*;
pub use quorum_slices::*;
pub use reachability::*;
pub use strongly_connected_components::*;
pub use transitive_quorum_set::*;
