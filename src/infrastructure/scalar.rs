//! Scalar inventory values
//!
//! Enumerators written against the cloud SDKs emit rule numbers as integers
//! and flags as booleans, while YAML inventories usually carry them unquoted.
//! Identity fields and tag values are compared as strings, so any scalar is
//! accepted and stringified on the way in.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged, expecting = "a string, number, or boolean")]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(flag) => flag.to_string(),
        }
    }
}

/// Deserialize one scalar as a string
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_string)
}

/// Deserialize a map of scalars as a map of strings
pub fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Scalar>::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, value.into_string()))
        .collect())
}
