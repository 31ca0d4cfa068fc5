use super::*;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StronglyConnectedComponent {
    pub nodes: NodeIdSet,
    /// Whether this component contains a self-sufficient core that is part of the transitive
    /// quorum set.
    pub is_transitive_quorum_set: bool,
}

/// The greatest subset of `node_set` in which every member can reach its quorum threshold when
/// all nodes outside the subset are treated as failing. Empty if there is no such subset.
///
/// Only quorum set configurations are considered here, not whether nodes are active.
pub fn find_self_sufficient_core(node_set: &NodeIdSet, network: &Network) -> NodeIdSet {
    let mut core = node_set.clone();
    loop {
        let outside = complement(&core, network.number_of_nodes());
        let unsatisfiable: Vec<NodeId> = core
            .iter()
            .filter(|&node_id| {
                !can_reach_threshold(
                    &network.nodes[node_id].quorum_set,
                    &outside,
                    &network.pk_to_id,
                )
            })
            .collect();
        if unsatisfiable.is_empty() {
            return core;
        }
        for node_id in unsatisfiable.into_iter() {
            core.remove(node_id);
        }
    }
}

/// Keeps the components that are meaningful clusters (more than one node, or one node that
/// trusts itself) and derives the transitive quorum set from them: the union of the
/// self-sufficient cores of all components with more than one node. `None` if all of those
/// cores are empty.
pub fn analyze_components(
    partition: &[NodeIdSet],
    graph: &DependencyGraph,
    network: &Network,
) -> (Vec<StronglyConnectedComponent>, Option<NodeIdSet>) {
    let mut components = vec![];
    let mut transitive_quorum_set = NodeIdSet::new();
    let mut number_of_cores = 0;

    for node_set in partition.iter() {
        let is_meaningful = node_set.len() > 1
            || node_set
                .iter()
                .next()
                .map_or(false, |node_id| graph.has_self_loop(node_id));
        if !is_meaningful {
            continue;
        }
        let core = if node_set.len() > 1 {
            find_self_sufficient_core(node_set, network)
        } else {
            NodeIdSet::new()
        };
        let is_transitive_quorum_set = !core.is_empty();
        if is_transitive_quorum_set {
            number_of_cores += 1;
            transitive_quorum_set.union_with(&core);
        }
        components.push(StronglyConnectedComponent {
            nodes: node_set.clone(),
            is_transitive_quorum_set,
        });
    }
    info!(
        "Found {} strongly connected components with more than one node or a self-loop.",
        components.len()
    );
    if number_of_cores == 0 {
        warn!("The network has no transitive quorum set!");
        (components, None)
    } else {
        if number_of_cores > 1 {
            warn!(
                "{} strongly connected components contain self-sufficient cores => the top tier is split!",
                number_of_cores
            );
        }
        info!(
            "Transitive quorum set contains {} nodes.",
            transitive_quorum_set.len()
        );
        (components, Some(transitive_quorum_set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_excludes_nodes_that_need_outsiders() {
        let network = Network::from_json_str(
            r#"[
            {
                "publicKey": "n0",
                "quorumSet": { "threshold": 2, "validators": ["n0", "n1", "n2"] }
            },
            {
                "publicKey": "n1",
                "quorumSet": { "threshold": 2, "validators": ["n0", "n1", "n2"] }
            },
            {
                "publicKey": "n2",
                "quorumSet": { "threshold": 3, "validators": ["n0", "n1", "n3"] }
            },
            {
                "publicKey": "n3",
                "quorumSet": { "threshold": 1, "validators": ["n3"] }
            }
        ]"#,
        )
        .unwrap();
        assert_eq!(
            bitset![0, 1],
            find_self_sufficient_core(&bitset![0, 1, 2], &network)
        );
        assert_eq!(Some(&bitset![0, 1]), network.transitive_quorum_set());

        // {n3} is reported because of its self-loop, but cannot be a transitive quorum set
        let components = network.strongly_connected_components();
        assert_eq!(2, components.len());
        assert_eq!(bitset![3], components[0].nodes);
        assert!(!components[0].is_transitive_quorum_set);
        assert_eq!(bitset![0, 1, 2], components[1].nodes);
        assert!(components[1].is_transitive_quorum_set);
    }

    #[test]
    fn removal_cascades_within_the_component() {
        let network = Network::from_json_str(
            r#"[
            {
                "publicKey": "n0",
                "quorumSet": { "threshold": 2, "validators": ["n1", "n2"] }
            },
            {
                "publicKey": "n1",
                "quorumSet": { "threshold": 2, "validators": ["n0", "n3"] }
            },
            {
                "publicKey": "n2",
                "quorumSet": { "threshold": 1, "validators": ["n0"] }
            },
            {
                "publicKey": "n3",
                "quorumSet": { "threshold": 1, "validators": ["n4"] }
            },
            {
                "publicKey": "n4",
                "quorumSet": { "threshold": 1, "validators": ["n3"] }
            }
        ]"#,
        )
        .unwrap();
        // {n3, n4} is its own component; n1 needs n3 and drags n0 and n2 down with it
        assert!(find_self_sufficient_core(&bitset![0, 1, 2], &network).is_empty());
        assert_eq!(Some(&bitset![3, 4]), network.transitive_quorum_set());
    }

    #[test]
    fn no_transitive_quorum_set_is_a_result_not_an_error() {
        let network = Network::from_json_str(
            r#"[
            {
                "publicKey": "n0",
                "quorumSet": { "threshold": 2, "validators": ["n1", "n9"] }
            },
            {
                "publicKey": "n1",
                "quorumSet": { "threshold": 2, "validators": ["n0", "n9"] }
            }
        ]"#,
        )
        .unwrap();
        assert!(!network.has_transitive_quorum_set());
        assert_eq!(None, network.transitive_quorum_set());
        assert_eq!(1, network.strongly_connected_components().len());
        assert!(!network.strongly_connected_components()[0].is_transitive_quorum_set);
    }

    #[test]
    fn singletons_are_only_reported_with_self_loops() {
        let network = Network::from_json_str(
            r#"[
            {
                "publicKey": "n0",
                "quorumSet": { "threshold": 1, "validators": ["n0"] }
            },
            {
                "publicKey": "n1",
                "quorumSet": { "threshold": 1, "validators": ["n0"] }
            }
        ]"#,
        )
        .unwrap();
        let components = network.strongly_connected_components();
        assert_eq!(1, components.len());
        assert_eq!(bitset![0], components[0].nodes);
        // a transitive quorum set needs a component with more than one node
        assert!(!components[0].is_transitive_quorum_set);
        assert!(!network.has_transitive_quorum_set());
    }

    #[test]
    fn split_top_tier_is_the_union_of_all_cores() {
        let network = Network::from_json_str(
            r#"[
            {
                "publicKey": "n0",
                "quorumSet": { "threshold": 2, "validators": ["n0", "n1"] }
            },
            {
                "publicKey": "n1",
                "quorumSet": { "threshold": 2, "validators": ["n0", "n1"] }
            },
            {
                "publicKey": "n2",
                "quorumSet": { "threshold": 2, "validators": ["n2", "n3"] }
            },
            {
                "publicKey": "n3",
                "quorumSet": { "threshold": 2, "validators": ["n2", "n3"] }
            }
        ]"#,
        )
        .unwrap();
        assert_eq!(Some(&bitset![0, 1, 2, 3]), network.transitive_quorum_set());
        assert_eq!(2, network.strongly_connected_components().len());
    }
}
