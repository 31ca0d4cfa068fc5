use super::*;
use std::cmp::min;

/// Directed "trusts" graph: an edge `u -> v` exists iff `v` appears (possibly in an inner quorum
/// set) in `u`'s quorum set.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct DependencyGraph {
    successors: Vec<Vec<NodeId>>,
}
impl DependencyGraph {
    pub fn new(nodes: &[Node], pk_to_id: &HashMap<PublicKey, NodeId>) -> Self {
        let successors = nodes
            .iter()
            .map(|node| {
                node.quorum_set
                    .contained_validators()
                    .into_iter()
                    .filter_map(|validator| pk_to_id.get(validator).copied())
                    .collect()
            })
            .collect();
        DependencyGraph { successors }
    }
    pub fn from_successors(successors: Vec<Vec<NodeId>>) -> Self {
        DependencyGraph { successors }
    }
    pub fn number_of_nodes(&self) -> usize {
        self.successors.len()
    }
    pub fn number_of_edges(&self) -> usize {
        self.successors.iter().map(|s| s.len()).sum()
    }
    pub fn successors(&self, node_id: NodeId) -> &[NodeId] {
        &self.successors[node_id]
    }
    pub fn has_self_loop(&self, node_id: NodeId) -> bool {
        self.successors[node_id].contains(&node_id)
    }
}

/// Partitions all nodes of `graph` into strongly connected components, using Tarjan's algorithm
/// with an explicit call stack (no recursion). Components are returned in the order in which
/// they are closed, i.e., sink components first.
pub fn find_strongly_connected_components(graph: &DependencyGraph) -> Vec<NodeIdSet> {
    let n = graph.number_of_nodes();
    let mut discovery_time: Vec<Option<usize>> = vec![None; n];
    let mut low_link: Vec<usize> = vec![0; n];
    let mut stack: Vec<NodeId> = vec![];
    let mut on_stack = NodeIdSet::with_capacity(n);
    // (node, index of the next successor to look at)
    let mut call_stack: Vec<(NodeId, usize)> = vec![];
    let mut time = 0;
    let mut components = vec![];

    for root in 0..n {
        if discovery_time[root].is_some() {
            continue;
        }
        discovery_time[root] = Some(time);
        low_link[root] = time;
        time += 1;
        stack.push(root);
        on_stack.insert(root);
        call_stack.push((root, 0));

        while let Some(frame) = call_stack.last_mut() {
            let node = frame.0;
            let successors = graph.successors(node);
            if frame.1 < successors.len() {
                let successor = successors[frame.1];
                frame.1 += 1;
                match discovery_time[successor] {
                    None => {
                        discovery_time[successor] = Some(time);
                        low_link[successor] = time;
                        time += 1;
                        stack.push(successor);
                        on_stack.insert(successor);
                        call_stack.push((successor, 0));
                    }
                    Some(successor_time) => {
                        if on_stack.contains(successor) {
                            low_link[node] = min(low_link[node], successor_time);
                        }
                    }
                }
            } else {
                call_stack.pop();
                if let Some(&(parent, _)) = call_stack.last() {
                    low_link[parent] = min(low_link[parent], low_link[node]);
                }
                if discovery_time[node] == Some(low_link[node]) {
                    let mut component = NodeIdSet::new();
                    while let Some(member) = stack.pop() {
                        on_stack.remove(member);
                        component.insert(member);
                        if member == node {
                            break;
                        }
                    }
                    components.push(component);
                }
            }
        }
    }
    debug!(
        "Found {} strongly connected components in a graph with {} nodes and {} edges.",
        components.len(),
        n,
        graph.number_of_edges()
    );
    components
}
