//! Tag Resolver
//!
//! Picks the display name for a cloud resource out of its tag set, falling
//! back to the cloud-assigned identifier when no usable tag is present.

use serde::{Deserialize, Serialize};

/// Tag key conventionally holding a resource's human-readable name
pub const NAME_TAG: &str = "Name";

/// A key/value tag attached to a cloud resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(deserialize_with = "super::scalar::string")]
    pub value: String,
}

#[cfg(test)]
impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Resolve the value of the tag `key`, or `fallback` when absent or empty.
///
/// Raw tag lists are not trusted to have unique keys; when a key repeats, the
/// last tag with a non-empty value wins.
pub fn resolve_tag(tags: &[Tag], key: &str, fallback: &str) -> String {
    tags.iter()
        .rev()
        .find(|tag| tag.key == key && !tag.value.is_empty())
        .map(|tag| tag.value.clone())
        .unwrap_or_else(|| fallback.to_string())
}
