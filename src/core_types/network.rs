use super::*;
use std::collections::HashSet;

/// A set of nodes and everything derived from their quorum sets.
///
/// All derived state (reverse dependency index, failing nodes, dependency graph, strongly
/// connected components, transitive quorum set, links) is recomputed wholesale on construction
/// and on [`Network::update_network`]. The slice cache survives updates because it is keyed by
/// quorum set content.
///
/// ## Example
/// ```
/// use fbas_network::Network;
///
/// let network = Network::from_json_str(
///     r#"[
///     {
///         "publicKey": "n0", "active": true, "isValidating": true,
///         "quorumSet": { "threshold": 2, "validators": ["n0", "n1"] }
///     },
///     {
///         "publicKey": "n1", "active": true, "isValidating": true,
///         "quorumSet": { "threshold": 2, "validators": ["n0", "n1"] }
///     },
///     {
///         "publicKey": "n2", "active": true, "isValidating": true,
///         "quorumSet": { "threshold": 1, "validators": ["n3"] }
///     }
/// ]"#,
/// )
/// .unwrap();
/// // "n3" is unknown and gets materialized as an inactive node
/// assert_eq!(4, network.number_of_nodes());
/// assert!(network.is_node_failing("n2"));
/// assert!(!network.is_node_failing("n0"));
/// assert_eq!(vec!["n2"], network.failing_public_keys());
/// ```
#[derive(Debug)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) pk_to_id: HashMap<PublicKey, NodeId>,
    organizations: Vec<Organization>,
    org_id_to_idx: HashMap<OrganizationId, usize>,
    pub(crate) reverse_dependencies: Vec<NodeIdSet>,
    failing_nodes: NodeIdSet,
    dependency_graph: DependencyGraph,
    component_ids: Vec<usize>,
    strongly_connected_components: Vec<StronglyConnectedComponent>,
    transitive_quorum_set: Option<NodeIdSet>,
    links: Vec<Link>,
    slices_generator: QuorumSlicesGenerator,
}

/// A trust relation between two active, non-failing nodes, annotated for presentation.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub is_part_of_strongly_connected_component: bool,
    pub is_part_of_transitive_quorum_set: bool,
}

impl Network {
    /// Panics if two nodes share the same public key.
    pub fn new(nodes: Vec<Node>, organizations: Vec<Organization>) -> Self {
        let org_id_to_idx = organizations
            .iter()
            .enumerate()
            .map(|(idx, org)| (org.id.clone(), idx))
            .collect();
        let mut network = Network {
            nodes,
            pk_to_id: HashMap::new(),
            organizations,
            org_id_to_idx,
            reverse_dependencies: vec![],
            failing_nodes: NodeIdSet::new(),
            dependency_graph: DependencyGraph::default(),
            component_ids: vec![],
            strongly_connected_components: vec![],
            transitive_quorum_set: None,
            links: vec![],
            slices_generator: QuorumSlicesGenerator::new(true),
        };
        network.derive_all();
        network
    }
    /// Replaces the node list (if given) and recomputes all derived state. This is the only way
    /// to mutate a network.
    pub fn update_network(&mut self, nodes: Option<Vec<Node>>) {
        if let Some(nodes) = nodes {
            self.nodes = nodes;
        }
        self.derive_all();
    }
    fn derive_all(&mut self) {
        debug!("Indexing {} nodes...", self.nodes.len());
        self.index_nodes();
        self.create_nodes_for_unknown_validators();

        debug!("Building reverse dependency index...");
        self.reverse_dependencies = build_reverse_dependency_index(&self.nodes, &self.pk_to_id);

        debug!("Propagating failures...");
        self.failing_nodes = compute_failing_nodes(self);

        debug!("Building dependency graph...");
        self.dependency_graph = DependencyGraph::new(&self.nodes, &self.pk_to_id);
        let partition = find_strongly_connected_components(&self.dependency_graph);
        self.component_ids = partition_ids(&partition, self.nodes.len());
        let (components, transitive_quorum_set) =
            analyze_components(&partition, &self.dependency_graph, self);
        self.strongly_connected_components = components;
        self.transitive_quorum_set = transitive_quorum_set;

        self.links = self.create_links();
    }
    fn index_nodes(&mut self) {
        self.pk_to_id = HashMap::with_capacity(self.nodes.len());
        for (node_id, node) in self.nodes.iter().enumerate() {
            if self
                .pk_to_id
                .insert(node.public_key.clone(), node_id)
                .is_some()
            {
                panic!("Duplicate public key {}", node.public_key);
            }
        }
    }
    fn create_nodes_for_unknown_validators(&mut self) {
        let mut seen: HashSet<&PublicKey> = HashSet::new();
        let mut unknown: Vec<PublicKey> = vec![];
        for node in self.nodes.iter() {
            for validator in node.quorum_set.contained_validators() {
                if !self.pk_to_id.contains_key(validator) && seen.insert(validator) {
                    unknown.push(validator.clone());
                }
            }
        }
        if !unknown.is_empty() {
            warn!(
                "{} validators are referenced in quorum sets but missing from the node list; \
                treating them as inactive.",
                unknown.len()
            );
        }
        for public_key in unknown.into_iter() {
            self.pk_to_id.insert(public_key.clone(), self.nodes.len());
            self.nodes.push(Node::new_unknown(public_key));
        }
    }
    fn create_links(&self) -> Vec<Link> {
        let is_up = |node_id: NodeId| {
            self.nodes[node_id].active && !self.failing_nodes.contains(node_id)
        };
        let mut links = vec![];
        for source in (0..self.nodes.len()).filter(|&id| is_up(id)) {
            for &target in self.dependency_graph.successors(source) {
                if !is_up(target) {
                    continue;
                }
                // a self-loop makes a singleton component meaningful, too
                let in_component = self.component_ids[source] == self.component_ids[target];
                let in_transitive_quorum_set = in_component
                    && self
                        .transitive_quorum_set
                        .as_ref()
                        .map_or(false, |tqs| tqs.contains(source) && tqs.contains(target));
                links.push(Link {
                    source,
                    target,
                    is_part_of_strongly_connected_component: in_component,
                    is_part_of_transitive_quorum_set: in_transitive_quorum_set,
                });
            }
        }
        links
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn all_nodes(&self) -> NodeIdSet {
        (0..self.nodes.len()).collect()
    }
    /// Includes the placeholder nodes created for unknown validators.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn get_node_id(&self, public_key: &str) -> Option<NodeId> {
        self.pk_to_id.get(public_key).copied()
    }
    pub fn get_node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }
    pub fn get_node_by_public_key(&self, public_key: &str) -> Option<&Node> {
        self.get_node_id(public_key).map(|id| &self.nodes[id])
    }
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }
    pub fn get_organization_by_id(&self, id: &str) -> Option<&Organization> {
        self.org_id_to_idx
            .get(id)
            .map(|&idx| &self.organizations[idx])
    }
    pub fn public_keys(&self, node_set: &NodeIdSet) -> Vec<&PublicKey> {
        node_set
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .map(|node| &node.public_key)
            .collect()
    }

    /// Active nodes that cannot reach their quorum threshold (possibly through cascading
    /// failures) or that are not validating. Inactive nodes are not part of this set.
    pub fn failing_nodes(&self) -> &NodeIdSet {
        &self.failing_nodes
    }
    pub fn failing_public_keys(&self) -> Vec<&PublicKey> {
        self.public_keys(&self.failing_nodes)
    }
    /// Unknown and inactive nodes are reported as failing, too.
    pub fn is_node_failing(&self, public_key: &str) -> bool {
        match self.get_node_id(public_key) {
            Some(node_id) => {
                !self.nodes[node_id].active || self.failing_nodes.contains(node_id)
            }
            None => true,
        }
    }
    /// Checks `quorum_set`, or the node's own quorum set if `None`, against the current failing
    /// nodes.
    pub fn is_quorum_set_failing(&self, public_key: &str, quorum_set: Option<&QuorumSet>) -> bool {
        let quorum_set = match quorum_set {
            Some(quorum_set) => quorum_set,
            None => match self.get_node_by_public_key(public_key) {
                Some(node) => &node.quorum_set,
                None => return true,
            },
        };
        !can_reach_threshold(quorum_set, &self.failing_nodes, self)
    }
    /// Failing if fewer than a simple majority of the organization's validators are up.
    pub fn is_organization_failing(&self, organization: &Organization) -> bool {
        let available = organization
            .validators
            .iter()
            .filter(|validator| !self.is_node_failing(validator))
            .count();
        available < organization.sub_quorum_threshold()
    }
    /// Nodes that have the given node in their quorum set, in node ID order.
    pub fn get_trusting_nodes(&self, public_key: &str) -> Vec<&Node> {
        match self.get_node_id(public_key) {
            Some(node_id) => self.reverse_dependencies[node_id]
                .iter()
                .map(|id| &self.nodes[id])
                .collect(),
            None => vec![],
        }
    }

    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.dependency_graph
    }
    /// Components with more than one node, or a single node that trusts itself.
    pub fn strongly_connected_components(&self) -> &[StronglyConnectedComponent] {
        &self.strongly_connected_components
    }
    /// `None` if no strongly connected component contains a self-sufficient set of nodes.
    pub fn transitive_quorum_set(&self) -> Option<&NodeIdSet> {
        self.transitive_quorum_set.as_ref()
    }
    pub fn has_transitive_quorum_set(&self) -> bool {
        self.transitive_quorum_set.is_some()
    }
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn get_slices(&self, quorum_set: &QuorumSet) -> Vec<Slice> {
        self.slices_generator.get_slices(quorum_set)
    }
    pub fn enable_slice_cache(&mut self) {
        self.slices_generator.enable_cache();
    }
    pub fn disable_slice_cache(&mut self) {
        self.slices_generator.disable_cache();
    }
}

/// Resolves public keys of *active* nodes only, so that inactive validators count as unavailable.
impl NodeResolver for Network {
    fn resolve(&self, public_key: &str) -> Option<NodeId> {
        self.get_node_id(public_key)
            .filter(|&node_id| self.nodes[node_id].active)
    }
}
