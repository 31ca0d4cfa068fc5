use super::*;
use std::sync::{Arc, PoisonError, RwLock};

type SliceCache = HashMap<HashKey, Arc<Vec<Slice>>>;

/// Enumerates the minimal quorum slices of quorum sets.
///
/// Results are memoized by quorum set hash key. The cache sits behind a lock so that one generator
/// can serve several analyses at once; quorum sets are immutable, so entries never go stale.
#[derive(Debug)]
pub struct QuorumSlicesGenerator {
    cache: RwLock<SliceCache>,
    cache_enabled: bool,
}
impl QuorumSlicesGenerator {
    pub fn new(cache_enabled: bool) -> Self {
        QuorumSlicesGenerator {
            cache: RwLock::new(HashMap::new()),
            cache_enabled,
        }
    }
    pub fn enable_cache(&mut self) {
        self.cache_enabled = true;
    }
    /// Disables lookups and inserts; existing entries are kept.
    pub fn disable_cache(&mut self) {
        self.cache_enabled = false;
    }
    pub fn is_cache_enabled(&self) -> bool {
        self.cache_enabled
    }
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
    pub fn cached_entries(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
    /// All combinations of exactly `threshold` members of `quorum_set`, where a validator
    /// contributes itself and an inner quorum set contributes one of its own slices.
    ///
    /// Quorum sets with a threshold of 0, or with a threshold exceeding the number of members,
    /// yield no slices.
    pub fn get_slices(&self, quorum_set: &QuorumSet) -> Vec<Slice> {
        let slices = self.get_shared_slices(quorum_set);
        debug!(
            "{} slices for quorum set {}.",
            slices.len(),
            quorum_set.hash_key()
        );
        (*slices).clone()
    }
    fn get_shared_slices(&self, quorum_set: &QuorumSet) -> Arc<Vec<Slice>> {
        if quorum_set.threshold == 0 || !quorum_set.is_satisfiable() {
            return Arc::new(vec![]);
        }
        if self.cache_enabled {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slices) = cache.get(quorum_set.hash_key()) {
                return Arc::clone(slices);
            }
        }
        let members: Vec<QuorumSetMember> = quorum_set.members().collect();
        let slices = Arc::new(self.combinations_of_size(quorum_set.threshold, &members));
        if self.cache_enabled {
            self.cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(quorum_set.hash_key().clone(), Arc::clone(&slices));
        }
        slices
    }
    fn combinations_of_size(&self, k: usize, members: &[QuorumSetMember]) -> Vec<Slice> {
        let mut combinations = vec![];
        for (i, member) in members.iter().enumerate() {
            let prefixes = match member {
                QuorumSetMember::Validator(validator) => {
                    Arc::new(vec![vec![(*validator).clone()]])
                }
                QuorumSetMember::InnerQuorumSet(inner) => self.get_shared_slices(inner),
            };
            let remaining = &members[i + 1..];
            if k == 1 {
                combinations.extend(prefixes.iter().cloned());
            } else if k - 1 <= remaining.len() {
                let suffixes = self.combinations_of_size(k - 1, remaining);
                for prefix in prefixes.iter() {
                    for suffix in suffixes.iter() {
                        combinations.push(prefix.iter().chain(suffix.iter()).cloned().collect());
                    }
                }
            }
        }
        combinations
    }
}
