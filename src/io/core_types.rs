use super::*;
use serde::de::Error as _;
use serde_with::{serde_as, NoneAsEmptyString};
use std::collections::HashSet;
use std::convert::TryInto;

#[derive(Serialize, Deserialize)]
pub(crate) struct RawNetwork(pub(crate) Vec<RawNode>);

#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNode {
    pub(crate) public_key: PublicKey,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) active: bool,
    #[serde(default)]
    pub(crate) is_validating: bool,
    // If no quorum set is given, we assume that the node is unsatisfiable, i.e., broken.
    #[serde(default = "RawQuorumSet::new_unsatisfiable")]
    pub(crate) quorum_set: RawQuorumSet,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawQuorumSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) hash_key: Option<HashKey>,
    pub(crate) threshold: u64,
    #[serde(default)]
    pub(crate) validators: Vec<PublicKey>,
    #[serde(default)]
    pub(crate) inner_quorum_sets: Vec<RawQuorumSet>,
}
impl RawQuorumSet {
    fn new_unsatisfiable() -> Self {
        Self {
            hash_key: None,
            threshold: 1,
            validators: vec![],
            inner_quorum_sets: vec![],
        }
    }
}

impl Network {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(Network::new(Self::nodes_from_json_str(json)?, vec![]))
    }
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        Self::from_json_str(&read_file(path)?)
    }
    pub fn from_json_stdin() -> Result<Self, Error> {
        let raw_network: RawNetwork = serde_json::from_reader(io::stdin())?;
        Ok(Network::new(Self::nodes_from_raw(raw_network)?, vec![]))
    }
    /// Parses and validates a node list without building a network, e.g., for passing it to
    /// [`Network::new`] together with organizations.
    pub fn nodes_from_json_str(json: &str) -> Result<Vec<Node>, Error> {
        Self::nodes_from_raw(serde_json::from_str(json)?)
    }
    pub fn nodes_from_json_file(path: &Path) -> Result<Vec<Node>, Error> {
        Self::nodes_from_json_str(&read_file(path)?)
    }
    pub fn nodes_from_json_stdin() -> Result<Vec<Node>, Error> {
        Self::nodes_from_raw(serde_json::from_reader(io::stdin())?)
    }
    /// Includes the placeholder nodes created for unknown validators.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self).expect("Error converting network to JSON!")
    }
    pub fn to_json_string_pretty(&self) -> String {
        serde_json::to_string_pretty(&self).expect("Error converting network to pretty JSON!")
    }
    pub(crate) fn nodes_from_raw(raw_network: RawNetwork) -> Result<Vec<Node>, Error> {
        let mut seen: HashSet<&PublicKey> = HashSet::new();
        for raw_node in raw_network.0.iter() {
            if !seen.insert(&raw_node.public_key) {
                return Err(Error::DuplicatePublicKey(raw_node.public_key.clone()));
            }
        }
        raw_network.0.into_iter().map(Node::from_raw).collect()
    }
    pub(crate) fn to_raw(&self) -> RawNetwork {
        RawNetwork(self.nodes.iter().map(|node| node.to_raw()).collect())
    }
}
impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(serializer)
    }
}

impl Node {
    pub(crate) fn from_raw(raw_node: RawNode) -> Result<Self, Error> {
        let quorum_set = QuorumSet::from_raw(raw_node.quorum_set).map_err(|validator| {
            Error::DuplicateValidator {
                node: raw_node.public_key.clone(),
                validator,
            }
        })?;
        Ok(Node {
            public_key: raw_node.public_key,
            name: raw_node.name,
            active: raw_node.active,
            is_validating: raw_node.is_validating,
            quorum_set,
        })
    }
    pub(crate) fn to_raw(&self) -> RawNode {
        RawNode {
            public_key: self.public_key.clone(),
            name: self.name.clone(),
            active: self.active,
            is_validating: self.is_validating,
            quorum_set: self.quorum_set.to_raw(),
        }
    }
}
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(serializer)
    }
}

impl QuorumSet {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self).expect("Error converting quorum set to JSON!")
    }
    /// Fails with the offending public key if some quorum set in the tree lists a validator
    /// twice.
    pub(crate) fn from_raw(raw_quorum_set: RawQuorumSet) -> Result<Self, PublicKey> {
        if let Some(duplicate) = find_duplicate(&raw_quorum_set.validators) {
            return Err(duplicate.clone());
        }
        let inner_quorum_sets = raw_quorum_set
            .inner_quorum_sets
            .into_iter()
            .map(QuorumSet::from_raw)
            .collect::<Result<Vec<QuorumSet>, PublicKey>>()?;
        let quorum_set = QuorumSet::new(
            raw_quorum_set.threshold.try_into().unwrap_or(usize::MAX),
            raw_quorum_set.validators,
            inner_quorum_sets,
        );
        if let Some(given_hash_key) = raw_quorum_set.hash_key {
            if &given_hash_key != quorum_set.hash_key() {
                debug!(
                    "Ignoring given hash key {}, using content hash {}.",
                    given_hash_key,
                    quorum_set.hash_key()
                );
            }
        }
        Ok(quorum_set)
    }
    pub(crate) fn to_raw(&self) -> RawQuorumSet {
        RawQuorumSet {
            hash_key: Some(self.hash_key.clone()),
            threshold: self
                .threshold
                .try_into()
                .expect("Error converting threshold from usize to u64."),
            validators: self.validators.clone(),
            inner_quorum_sets: self
                .inner_quorum_sets
                .iter()
                .map(|inner| inner.to_raw())
                .collect(),
        }
    }
}
impl Serialize for QuorumSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for QuorumSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_quorum_set = RawQuorumSet::deserialize(deserializer)?;
        QuorumSet::from_raw(raw_quorum_set).map_err(|validator| {
            D::Error::custom(format!("duplicate validator {} in quorum set", validator))
        })
    }
}
