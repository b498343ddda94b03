//! Composite Identity Codec
//!
//! Some resources are addressed by more than one key (a group name plus a
//! policy name, a subnet plus a route table). Their identity is carried as a
//! field mapping and only flattened into a provider import string at the
//! very end, by the resource type that owns the field set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{ImportError, ImportResult};

/// A multi-field identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeId {
    fields: BTreeMap<String, String>,
}

impl CompositeId {
    /// Wrap a field mapping
    pub fn encode<K, V, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a field, returning `("", false)` when absent
    pub fn decode(&self, key: &str) -> (String, bool) {
        match self.fields.get(key) {
            Some(value) => (value.clone(), true),
            None => (String::new(), false),
        }
    }

    /// Read a field the resource type is known to record.
    ///
    /// Absence means the enumeration and consumption sides disagree about the
    /// field set, so it is reported as an error instead of defaulted.
    pub fn require(&self, resource_type: &str, key: &str) -> ImportResult<String> {
        match self.decode(key) {
            (value, true) => Ok(value),
            (_, false) => Err(ImportError::MissingIdentityField {
                resource_type: resource_type.to_string(),
                field: key.to_string(),
            }),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
