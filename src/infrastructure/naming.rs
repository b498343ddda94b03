//! Name Allocator
//!
//! Turns candidate display names into unique, label-safe names for one
//! enumeration pass. Cloud resources routinely share tag names (two security
//! groups both tagged `web`), while a Terraform configuration needs one label
//! per resource of a given type, so collisions are resolved with a numeric
//! suffix instead of being rejected.
//!
//! An allocator is scoped to exactly one pass and is handed to it by `&mut`.
//! There is no shared naming state between passes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Name used when canonicalization leaves nothing behind
const EMPTY_NAME_REPLACEMENT: &str = "resource";

/// Canonicalization applied to a candidate before deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameFormat {
    /// Keep the candidate as-is
    Verbatim,
    /// Replace hyphens with underscores
    Underscore,
    /// Lowercase Terraform-style identifier
    #[default]
    Terraform,
}

impl NameFormat {
    /// Parse a format from its CLI name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "verbatim" | "raw" => Some(NameFormat::Verbatim),
            "underscore" => Some(NameFormat::Underscore),
            "terraform" | "tf" => Some(NameFormat::Terraform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NameFormat::Verbatim => "verbatim",
            NameFormat::Underscore => "underscore",
            NameFormat::Terraform => "terraform",
        }
    }

    /// Apply this format to a candidate name
    pub fn canonicalize(&self, candidate: &str) -> String {
        let formatted = match self {
            NameFormat::Verbatim => candidate.to_string(),
            NameFormat::Underscore => candidate.replace('-', "_"),
            NameFormat::Terraform => sanitize_tf_name(candidate),
        };

        if formatted.is_empty() {
            EMPTY_NAME_REPLACEMENT.to_string()
        } else {
            formatted
        }
    }
}

impl std::fmt::Display for NameFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sanitize a string to be a valid Terraform resource name
fn sanitize_tf_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.trim_matches('_');

    match sanitized.chars().next() {
        None => EMPTY_NAME_REPLACEMENT.to_string(),
        Some(first) if first.is_ascii_digit() => format!("r_{}", sanitized),
        Some(_) => sanitized.to_string(),
    }
}

/// Issues unique names within one enumeration pass
#[derive(Debug, Default)]
pub struct NameAllocator {
    format: NameFormat,
    /// Every name issued so far, mapped to how often its base was requested
    issued: HashMap<String, usize>,
}

impl NameAllocator {
    /// Create a fresh allocator for one pass
    pub fn new(format: NameFormat) -> Self {
        Self {
            format,
            issued: HashMap::new(),
        }
    }

    /// Allocate a unique name for `candidate`.
    ///
    /// The first request for a canonical name returns it unchanged. Repeat
    /// requests return `name-2`, `name-3`, and so on. A suffixed name that was
    /// already issued in its own right is skipped.
    pub fn allocate(&mut self, candidate: &str) -> String {
        let base = self.format.canonicalize(candidate);

        let Some(&previous) = self.issued.get(&base) else {
            self.issued.insert(base.clone(), 1);
            return base;
        };

        let mut occurrence = previous;

        loop {
            occurrence += 1;
            let suffixed = format!("{}-{}", base, occurrence);

            if !self.issued.contains_key(&suffixed) {
                debug!(name = %base, issued = %suffixed, "name collision resolved");
                self.issued.insert(base, occurrence);
                self.issued.insert(suffixed.clone(), 1);
                return suffixed;
            }
        }
    }

    /// All issued names, sorted
    pub fn issued(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.issued.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
