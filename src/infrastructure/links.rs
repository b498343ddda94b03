//! Reference links between instances
//!
//! Records reference other cloud resources by cloud ID. Once every pass has
//! issued names, those IDs can be rewritten into Terraform addresses.

use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

use super::discovery::{DependencyType, Instance, ResourceReference};

/// A resolved reference between two instances of the same import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLink {
    /// Address of the referencing instance
    pub from: String,
    /// Address of the referenced instance
    pub to: String,
    pub relationship: DependencyType,
}

/// A reference whose target was not part of the import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    pub from: String,
    pub reference: ResourceReference,
}

/// Maps `(resource_type, cloud_id)` to the address issued for it
#[derive(Debug, Default)]
pub struct AddressBook {
    addresses: HashMap<(String, String), String>,
}

impl AddressBook {
    /// Index every single-identity instance by its cloud ID.
    ///
    /// The first instance holding an ID keeps it; later holders are logged
    /// and left out.
    pub fn build(instances: &[Instance]) -> Self {
        let mut addresses = HashMap::new();

        for instance in instances {
            let Some(id) = instance.id() else {
                continue;
            };

            let key = (instance.resource_type().to_string(), id.to_string());
            match addresses.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(instance.address());
                }
                Entry::Occupied(taken) => {
                    warn!(
                        id,
                        kept = %taken.get(),
                        ignored = %instance.address(),
                        "cloud ID claimed by more than one instance"
                    );
                }
            }
        }

        Self { addresses }
    }

    pub fn resolve(&self, resource_type: &str, resource_id: &str) -> Option<&str> {
        self.addresses
            .get(&(resource_type.to_string(), resource_id.to_string()))
            .map(String::as_str)
    }

    /// Number of addressable instances
    pub fn count(&self) -> usize {
        self.addresses.len()
    }
}

/// Resolve every instance reference against the instances themselves
pub fn link_instances(instances: &[Instance]) -> (Vec<ResourceLink>, Vec<UnresolvedReference>) {
    let book = AddressBook::build(instances);
    let mut links = Vec::new();
    let mut unresolved = Vec::new();

    for instance in instances {
        for reference in instance.references() {
            match book.resolve(&reference.resource_type, &reference.resource_id) {
                Some(to) => links.push(ResourceLink {
                    from: instance.address(),
                    to: to.to_string(),
                    relationship: reference.relationship,
                }),
                None => unresolved.push(UnresolvedReference {
                    from: instance.address(),
                    reference: reference.clone(),
                }),
            }
        }
    }

    debug!(
        addresses = book.count(),
        links = links.len(),
        unresolved = unresolved.len(),
        "references linked"
    );

    (links, unresolved)
}
