use super::*;

/// For each node, the set of nodes that list it (directly or in an inner quorum set) as a
/// validator. Validators that do not resolve are skipped.
pub fn build_reverse_dependency_index(
    nodes: &[Node],
    pk_to_id: &HashMap<PublicKey, NodeId>,
) -> Vec<NodeIdSet> {
    let mut trusting_nodes = vec![NodeIdSet::new(); nodes.len()];
    for (node_id, node) in nodes.iter().enumerate() {
        for validator in node.quorum_set.contained_validators() {
            if let Some(&validator_id) = pk_to_id.get(validator) {
                trusting_nodes[validator_id].insert(node_id);
            }
        }
    }
    trusting_nodes
}

/// Computes the set of failing nodes as a fixed point: active nodes whose quorum set cannot reach
/// its threshold given the other failing nodes, and active nodes that are not validating.
///
/// Each node is checked at least once; whenever a node is marked failing, only the nodes that
/// trust it are re-checked. Failure is monotonic, so the result does not depend on the order in
/// which nodes are processed.
pub fn compute_failing_nodes(network: &Network) -> NodeIdSet {
    debug_assert!(
        network.nodes.iter().all(|node| node
            .quorum_set
            .contained_validators()
            .into_iter()
            .all(|validator| network.pk_to_id.contains_key(validator))),
        "All validators must be materialized as nodes before propagating failures"
    );
    let mut failing = NodeIdSet::with_capacity(network.nodes.len());
    let mut to_check: Vec<NodeId> = (0..network.nodes.len())
        .filter(|&node_id| network.nodes[node_id].is_failure_candidate())
        .collect();
    debug!("Checking {} active nodes...", to_check.len());

    while let Some(node_id) = to_check.pop() {
        if failing.contains(node_id) {
            continue;
        }
        let node = &network.nodes[node_id];
        if node.is_validating && can_reach_threshold(&node.quorum_set, &failing, network) {
            continue;
        }
        failing.insert(node_id);
        to_check.extend(
            network.reverse_dependencies[node_id]
                .iter()
                .filter(|&trusting| network.nodes[trusting].is_failure_candidate()),
        );
    }
    info!("Found {} failing nodes.", failing.len());
    failing
}
