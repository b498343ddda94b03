use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ImportResult;
use super::identity::CompositeId;
use super::tags::Tag;

/// Type of relationship between resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    /// Resource is contained within parent (e.g., subnet in VPC)
    Parent,
    /// Resource references another resource (e.g., instance uses security group)
    #[default]
    Reference,
    /// Loose association (e.g., tags, policies)
    Association,
}

/// A reference from one enumerated resource to another cloud resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// The resource type (e.g., aws_vpc)
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The cloud ID of the referenced resource (e.g., vpc-12345)
    #[serde(rename = "id")]
    pub resource_id: String,
    #[serde(default)]
    pub relationship: DependencyType,
}

/// A raw record yielded by a resource enumerator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResource {
    /// The Terraform resource type (e.g., aws_instance)
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Cloud-assigned ID, also the fallback display name
    #[serde(default)]
    pub id: String,
    /// Fallback display name for resources without a single cloud ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Named fields for composite identity
    #[serde(default, deserialize_with = "super::scalar::string_map")]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub references: Vec<ResourceReference>,
}

impl RawResource {
    /// The string used when no name tag applies: the cloud ID, else `name`
    pub fn fallback_name(&self) -> Option<&str> {
        if !self.id.is_empty() {
            return Some(&self.id);
        }

        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Get a display string for the record
    pub fn display_string(&self) -> String {
        match self.fallback_name() {
            Some(name) => format!("{} ({})", self.resource_type, name),
            None => format!("{} (unnamed)", self.resource_type),
        }
    }
}

/// How an instance is addressed for import
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Identity {
    /// One provider ID string
    #[serde(rename = "id")]
    Single(String),
    /// A fixed set of named fields
    #[serde(rename = "composite_id")]
    Composite(CompositeId),
}

/// One discovered cloud resource, named and identified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    resource_type: String,
    name: String,
    #[serde(flatten)]
    identity: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    references: Vec<ResourceReference>,
}

impl Instance {
    pub fn new(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        identity: Identity,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            identity,
            region: None,
            references: Vec::new(),
        }
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn with_references(mut self, references: Vec<ResourceReference>) -> Self {
        self.references = references;
        self
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The unique label issued by the name allocator
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The single import ID, if this type is addressed by one
    pub fn id(&self) -> Option<&str> {
        match &self.identity {
            Identity::Single(id) => Some(id),
            Identity::Composite(_) => None,
        }
    }

    pub fn composite_id(&self) -> Option<&CompositeId> {
        match &self.identity {
            Identity::Single(_) => None,
            Identity::Composite(fields) => Some(fields),
        }
    }

    pub fn references(&self) -> &[ResourceReference] {
        &self.references
    }

    /// Terraform address, e.g. `aws_instance.web`
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }
}

/// Source of raw resource records
///
/// Implementations wrap whatever already enumerated the cloud account; the
/// records are consumed in the order they are returned.
pub trait ResourceEnumerator {
    /// Human-readable description of where records come from
    fn source(&self) -> &str;

    /// Yield every record
    fn enumerate(&self) -> ImportResult<Vec<RawResource>>;
}

/// Enumerator over records already held in memory
#[cfg(test)]
pub struct StaticEnumerator {
    records: Vec<RawResource>,
}

#[cfg(test)]
impl StaticEnumerator {
    pub fn new(records: Vec<RawResource>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
impl ResourceEnumerator for StaticEnumerator {
    fn source(&self) -> &str {
        "in-memory records"
    }

    fn enumerate(&self) -> ImportResult<Vec<RawResource>> {
        Ok(self.records.clone())
    }
}

/// Builders for records assembled by hand in tests
#[cfg(test)]
impl RawResource {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_reference(mut self, reference: ResourceReference) -> Self {
        self.references.push(reference);
        self
    }
}

#[cfg(test)]
impl ResourceReference {
    pub fn new(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        relationship: DependencyType,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            relationship,
        }
    }
}
