use super::*;

/// Maps validator public keys to node IDs. A key that does not resolve counts as failing.
pub trait NodeResolver {
    fn resolve(&self, public_key: &str) -> Option<NodeId>;
}
impl NodeResolver for HashMap<PublicKey, NodeId> {
    fn resolve(&self, public_key: &str) -> Option<NodeId> {
        self.get(public_key).copied()
    }
}

/// Whether at least `threshold` direct members of `quorum_set` are satisfied, given that the
/// nodes in `failing` are down. A validator is satisfied if it resolves to a node not in
/// `failing`; an inner quorum set is satisfied if it can reach its own threshold. A threshold of
/// 0 is always reached.
pub fn can_reach_threshold<R>(quorum_set: &QuorumSet, failing: &NodeIdSet, resolver: &R) -> bool
where
    R: NodeResolver + ?Sized,
{
    if quorum_set.threshold > quorum_set.number_of_members() {
        return false;
    }
    let mut satisfied = 0;
    for member in quorum_set.members() {
        if satisfied >= quorum_set.threshold {
            break;
        }
        let member_satisfied = match member {
            QuorumSetMember::Validator(public_key) => resolver
                .resolve(public_key)
                .map_or(false, |node_id| !failing.contains(node_id)),
            QuorumSetMember::InnerQuorumSet(inner) => {
                can_reach_threshold(inner, failing, resolver)
            }
        };
        if member_satisfied {
            satisfied += 1;
        }
    }
    satisfied >= quorum_set.threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> HashMap<PublicKey, NodeId> {
        vec![("0", 0), ("1", 1), ("2", 2)]
            .into_iter()
            .map(|(pk, id)| (pk.to_string(), id))
            .collect()
    }

    fn qset(threshold: usize, validators: &[&str], inner: Vec<QuorumSet>) -> QuorumSet {
        QuorumSet::new(
            threshold,
            validators.iter().map(|v| v.to_string()).collect(),
            inner,
        )
    }

    #[test]
    fn reaches_threshold_without_failures() {
        let quorum_set = qset(2, &["0", "1", "2"], vec![]);
        assert!(can_reach_threshold(&quorum_set, &bitset![], &resolver()));
    }

    #[test]
    fn threshold_above_member_count_is_never_reached() {
        let quorum_set = qset(4, &["0", "1", "2"], vec![]);
        assert!(!can_reach_threshold(&quorum_set, &bitset![], &resolver()));
    }

    #[test]
    fn failing_validators_are_not_counted() {
        let quorum_set = qset(2, &["0", "1", "2"], vec![]);
        assert!(!can_reach_threshold(&quorum_set, &bitset![0, 1], &resolver()));
        assert!(can_reach_threshold(&quorum_set, &bitset![0], &resolver()));
    }

    #[test]
    fn inner_quorum_sets() {
        let quorum_set = qset(
            2,
            &[],
            vec![qset(2, &["0", "1", "2"], vec![]), qset(1, &["0"], vec![])],
        );
        assert!(can_reach_threshold(&quorum_set, &bitset![], &resolver()));
        assert!(!can_reach_threshold(&quorum_set, &bitset![0], &resolver()));
    }

    #[test]
    fn nested_inner_quorum_sets() {
        let quorum_set = qset(
            2,
            &[],
            vec![
                qset(2, &["0"], vec![qset(1, &["2"], vec![])]),
                qset(1, &["0"], vec![]),
            ],
        );
        assert!(can_reach_threshold(&quorum_set, &bitset![], &resolver()));
        assert!(!can_reach_threshold(&quorum_set, &bitset![2], &resolver()));
    }

    #[test]
    fn unresolvable_validators_count_as_failing() {
        let quorum_set = qset(2, &["0", "unknown"], vec![]);
        assert!(!can_reach_threshold(&quorum_set, &bitset![], &resolver()));
    }

    #[test]
    fn threshold_zero_is_vacuously_reached() {
        assert!(can_reach_threshold(&QuorumSet::new_empty(), &bitset![], &resolver()));
        let quorum_set = qset(0, &["0"], vec![]);
        assert!(can_reach_threshold(&quorum_set, &bitset![0], &resolver()));
    }

    #[test]
    fn reachable_iff_enough_members_are_satisfied() {
        let members = ["0", "1", "2"];
        let failing_sets = vec![bitset![], bitset![0], bitset![0, 1], bitset![0, 1, 2]];
        for failing in failing_sets.iter() {
            let satisfied = 3 - failing.len();
            for threshold in 0..=4 {
                let quorum_set = qset(threshold, &members, vec![]);
                assert_eq!(
                    threshold <= satisfied,
                    can_reach_threshold(&quorum_set, failing, &resolver()),
                    "threshold {} with failing {:?}",
                    threshold,
                    failing
                );
            }
        }
    }
}
