use super::*;

pub use bit_set::BitSet;
pub use std::collections::HashMap;

pub type NodeId = usize; // internal and possibly different between runs
pub type PublicKey = String;
pub type HashKey = String;

pub type NodeIdSet = BitSet;

/// A minimal combination of validators satisfying a quorum set.
pub type Slice = Vec<PublicKey>;

mod network;
mod node;
mod organizations;
mod quorum_set;
mod set_helpers;

pub use network::*;
pub use node::*;
pub use organizations::*;
pub use quorum_set::*;
pub use set_helpers::*;
