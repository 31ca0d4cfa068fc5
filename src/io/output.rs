use super::*;

macro_rules! json_format_single_line {
    ($x:expr) => {
        serde_json::to_string(&$x).expect("Error formatting as JSON")
    };
}

/// Node IDs, or public keys if `pretty` is set, as a JSON list.
pub fn format_node_ids(node_set: &NodeIdSet, network: &Network, pretty: bool) -> String {
    if pretty {
        json_format_single_line!(network.public_keys(node_set))
    } else {
        json_format_single_line!(node_set.iter().collect::<Vec<NodeId>>())
    }
}

pub fn format_node_id_sets(node_sets: &[NodeIdSet], network: &Network, pretty: bool) -> String {
    if pretty {
        json_format_single_line!(node_sets
            .iter()
            .map(|node_set| network.public_keys(node_set))
            .collect::<Vec<Vec<&PublicKey>>>())
    } else {
        json_format_single_line!(node_sets
            .iter()
            .map(|node_set| node_set.iter().collect())
            .collect::<Vec<Vec<NodeId>>>())
    }
}

pub fn format_slices(slices: &[Slice]) -> String {
    json_format_single_line!(slices)
}

pub fn format_organizations(organizations: &[&Organization]) -> String {
    json_format_single_line!(organizations
        .iter()
        .map(|org| org.name())
        .collect::<Vec<&str>>())
}
