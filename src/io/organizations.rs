use super::*;

#[derive(Serialize, Deserialize)]
struct RawOrganizations(Vec<RawOrganization>);
#[derive(Serialize, Deserialize)]
struct RawOrganization {
    id: OrganizationId,
    name: String,
    #[serde(default)]
    validators: Vec<PublicKey>,
}

impl Organization {
    /// Parses a stellarbeat.org style "organizations" list.
    pub fn vec_from_json_str(json: &str) -> Result<Vec<Self>, Error> {
        let raw_organizations: RawOrganizations = serde_json::from_str(json)?;
        Ok(raw_organizations
            .0
            .into_iter()
            .map(Organization::from_raw)
            .collect())
    }
    pub fn vec_from_json_file(path: &Path) -> Result<Vec<Self>, Error> {
        Self::vec_from_json_str(&read_file(path)?)
    }
    fn from_raw(raw_organization: RawOrganization) -> Self {
        Organization {
            id: raw_organization.id,
            name: raw_organization.name,
            validators: raw_organization.validators,
        }
    }
    fn to_raw(&self) -> RawOrganization {
        RawOrganization {
            id: self.id.clone(),
            name: self.name.clone(),
            validators: self.validators.clone(),
        }
    }
}
impl Serialize for Organization {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(serializer)
    }
}
