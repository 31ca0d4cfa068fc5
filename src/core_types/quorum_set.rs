use super::*;
use sha3::{Digest, Sha3_256};
use std::collections::HashSet;

/// A threshold-of-N voting rule over validators and nested quorum sets.
///
/// Immutable once constructed; the `hash_key` is derived from the content at construction time,
/// so structurally identical quorum sets always share a hash key.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct QuorumSet {
    pub(crate) threshold: usize,
    pub(crate) validators: Vec<PublicKey>,
    pub(crate) inner_quorum_sets: Vec<QuorumSet>,
    pub(crate) hash_key: HashKey,
}

/// A direct child of a quorum set.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum QuorumSetMember<'a> {
    Validator(&'a PublicKey),
    InnerQuorumSet(&'a QuorumSet),
}

impl QuorumSet {
    /// Panics if `validators` contains duplicates.
    pub fn new(
        threshold: usize,
        validators: Vec<PublicKey>,
        inner_quorum_sets: Vec<QuorumSet>,
    ) -> Self {
        if let Some(duplicate) = find_duplicate(&validators) {
            panic!("Duplicate validator {} in quorum set", duplicate);
        }
        let hash_key = compute_hash_key(threshold, &validators, &inner_quorum_sets);
        QuorumSet {
            threshold,
            validators,
            inner_quorum_sets,
            hash_key,
        }
    }
    /// Trusts no one. Vacuously reaches its threshold but yields no slices.
    pub fn new_empty() -> Self {
        Self::new(0, vec![], vec![])
    }
    /// Can never reach its threshold.
    pub fn new_unsatisfiable() -> Self {
        Self::new(1, vec![], vec![])
    }
    pub fn threshold(&self) -> usize {
        self.threshold
    }
    pub fn validators(&self) -> &[PublicKey] {
        &self.validators
    }
    pub fn inner_quorum_sets(&self) -> &[QuorumSet] {
        &self.inner_quorum_sets
    }
    pub fn hash_key(&self) -> &HashKey {
        &self.hash_key
    }
    /// Validators first, then inner quorum sets, each in declaration order.
    pub fn members(&self) -> impl Iterator<Item = QuorumSetMember<'_>> + '_ {
        self.validators
            .iter()
            .map(QuorumSetMember::Validator)
            .chain(
                self.inner_quorum_sets
                    .iter()
                    .map(QuorumSetMember::InnerQuorumSet),
            )
    }
    pub fn number_of_members(&self) -> usize {
        self.validators.len() + self.inner_quorum_sets.len()
    }
    /// `false` for thresholds that exceed the number of members.
    pub fn is_satisfiable(&self) -> bool {
        self.threshold <= self.number_of_members()
    }
    pub fn has_validators(&self) -> bool {
        !self.validators.is_empty()
            || self
                .inner_quorum_sets
                .iter()
                .any(|inner| inner.has_validators())
    }
    /// All validators of this quorum set and its inner quorum sets, in first-seen (depth-first)
    /// order and without duplicates.
    pub fn contained_validators(&self) -> Vec<&PublicKey> {
        let mut seen: HashSet<&PublicKey> = HashSet::new();
        let mut result = vec![];
        let mut stack: Vec<&QuorumSet> = vec![self];
        while let Some(quorum_set) = stack.pop() {
            for validator in quorum_set.validators.iter() {
                if seen.insert(validator) {
                    result.push(validator);
                }
            }
            // reversed so that the first inner quorum set is visited first
            stack.extend(quorum_set.inner_quorum_sets.iter().rev());
        }
        result
    }
}
impl Default for QuorumSet {
    fn default() -> Self {
        Self::new_empty()
    }
}

pub(crate) fn find_duplicate(validators: &[PublicKey]) -> Option<&PublicKey> {
    let mut seen = HashSet::new();
    validators.iter().find(|&v| !seen.insert(v))
}

fn compute_hash_key(
    threshold: usize,
    validators: &[PublicKey],
    inner_quorum_sets: &[QuorumSet],
) -> HashKey {
    // length prefixes keep the encoding unambiguous
    let mut hasher = Sha3_256::new();
    hasher.update((threshold as u64).to_le_bytes());
    hasher.update((validators.len() as u64).to_le_bytes());
    for validator in validators {
        hasher.update((validator.len() as u64).to_le_bytes());
        hasher.update(validator.as_bytes());
    }
    hasher.update((inner_quorum_sets.len() as u64).to_le_bytes());
    for inner in inner_quorum_sets {
        hasher.update(inner.hash_key.as_bytes());
    }
    hex::encode(hasher.finalize())
}
