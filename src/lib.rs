//! Structural liveness analysis for FBASs like the Stellar network.
//!
//! A [`Network`] is built from a list of nodes (and, optionally, organizations). On
//! construction, and on every call to [`Network::update_network`], it
//!
//! 1. creates placeholder nodes for validators that are referenced but unknown,
//! 2. indexes which nodes trust which validators,
//! 3. propagates failures until a fixed point is reached, and
//! 4. partitions the trust graph into strongly connected components to find the
//!    transitive quorum set ("top tier").
//!
//! ## Example
//! ```
//! use fbas_network::{Network, Node, QuorumSet};
//!
//! let quorum_set = QuorumSet::new(2, vec!["a".into(), "b".into(), "c".into()], vec![]);
//! let nodes = vec![
//!     Node::new("a".into(), quorum_set.clone()),
//!     Node::new("b".into(), quorum_set.clone()),
//!     Node::new("c".into(), quorum_set.clone()).with_validating(false),
//! ];
//! let network = Network::new(nodes, vec![]);
//!
//! assert!(!network.is_node_failing("a"));
//! assert!(network.is_node_failing("c"));
//! assert!(network.has_transitive_quorum_set());
//! assert_eq!(3, network.get_slices(&quorum_set).len());
//! ```

mod analysis;
mod core_types;
mod error;
mod io;

pub use analysis::*;
pub use core_types::*;
pub use error::Error;
pub use io::*;

use log::{debug, info, warn};
