use super::*;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Node {
    pub(crate) public_key: PublicKey,
    pub(crate) name: Option<String>,
    /// Observed as reachable.
    pub(crate) active: bool,
    /// Observed as issuing consensus votes.
    pub(crate) is_validating: bool,
    pub(crate) quorum_set: QuorumSet,
}
impl Node {
    /// An active, validating node.
    pub fn new(public_key: PublicKey, quorum_set: QuorumSet) -> Self {
        Node {
            public_key,
            name: None,
            active: true,
            is_validating: true,
            quorum_set,
        }
    }
    /// Placeholder for a validator that is referenced in some quorum set but was never observed.
    pub fn new_unknown(public_key: PublicKey) -> Self {
        Node {
            public_key,
            name: None,
            active: false,
            is_validating: false,
            quorum_set: QuorumSet::new_empty(),
        }
    }
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
    pub fn with_validating(mut self, is_validating: bool) -> Self {
        self.is_validating = is_validating;
        self
    }
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// Name if known, public key otherwise.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(&self.public_key)
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn is_validating(&self) -> bool {
        self.is_validating
    }
    pub fn quorum_set(&self) -> &QuorumSet {
        &self.quorum_set
    }
    /// Only active nodes with a non-empty quorum set take part in failure propagation.
    pub(crate) fn is_failure_candidate(&self) -> bool {
        self.active && self.quorum_set.has_validators()
    }
}
