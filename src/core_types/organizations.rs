use super::*;

pub type OrganizationId = String;

/// A named group of validators run by the same entity.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Organization {
    pub(crate) id: OrganizationId,
    pub(crate) name: String,
    pub(crate) validators: Vec<PublicKey>,
}
impl Organization {
    pub fn new(id: impl Into<OrganizationId>, name: impl Into<String>, validators: Vec<PublicKey>) -> Self {
        Organization {
            id: id.into(),
            name: name.into(),
            validators,
        }
    }
    pub fn id(&self) -> &OrganizationId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn validators(&self) -> &[PublicKey] {
        &self.validators
    }
    /// Number of non-failing validators needed for the organization to be considered available
    /// (simple majority, rounded up).
    pub fn sub_quorum_threshold(&self) -> usize {
        (self.validators.len() + 1) / 2
    }
    /// Number of failing validators at which the organization stops being available.
    pub fn sub_quorum_fail_at(&self) -> usize {
        self.validators.len() - self.sub_quorum_threshold() + 1
    }
}
