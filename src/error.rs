use std::path::PathBuf;
use thiserror::Error;

use crate::PublicKey;

/// Errors surfaced while turning external input into a [`Network`](crate::Network).
///
/// The analyses themselves never fail; unsatisfiable configurations are results, not errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not valid JSON or does not have the expected shape.
    #[error("error parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An input file could not be read.
    #[error("error reading file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two nodes in the input share the same public key.
    #[error("duplicate public key {0}")]
    DuplicatePublicKey(PublicKey),

    /// A quorum set lists the same validator more than once.
    #[error("validator {validator} is listed more than once in a quorum set of node {node}")]
    DuplicateValidator { node: PublicKey, validator: PublicKey },
}
