use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::infrastructure::discovery::{Identity, Instance, RawResource, ResourceEnumerator};
use crate::infrastructure::error::{ImportError, ImportResult};
use crate::infrastructure::links::{link_instances, ResourceLink, UnresolvedReference};
use crate::infrastructure::naming::{NameAllocator, NameFormat};
use crate::infrastructure::resource_types::{self, ResourceTypeSpec};
use crate::infrastructure::tags::{resolve_tag, NAME_TAG};
use crate::traits::Output;

/// Options for building an import plan
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Tag key holding the display name
    pub name_tag: String,
    /// Canonicalization applied to names before deduplication
    pub name_format: NameFormat,
    /// Skip records of unsupported types instead of failing
    pub skip_unsupported: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            name_tag: NAME_TAG.to_string(),
            name_format: NameFormat::default(),
            skip_unsupported: false,
        }
    }
}

/// One enumeration pass over the records of a single resource type
pub struct EnumerationPass<'a> {
    spec: &'static ResourceTypeSpec,
    name_tag: &'a str,
}

impl<'a> EnumerationPass<'a> {
    pub fn new(resource_type: &str, name_tag: &'a str) -> ImportResult<Self> {
        Ok(Self {
            spec: resource_types::lookup(resource_type)?,
            name_tag,
        })
    }

    pub fn resource_type(&self) -> &'static str {
        self.spec.tf_type
    }

    /// Turn records into instances, in order, naming them with `allocator`.
    ///
    /// The allocator belongs to this pass; names it issues are unique among
    /// the returned instances. A record whose identity was already seen in
    /// this pass describes the same cloud resource and is skipped before it
    /// takes a name.
    pub fn run(
        &self,
        records: &[RawResource],
        allocator: &mut NameAllocator,
    ) -> ImportResult<PassOutcome> {
        let mut seen: HashSet<Identity> = HashSet::new();
        let mut outcome = PassOutcome::default();

        for record in records {
            let (fallback, identity) = self.check(record)?;

            if seen.contains(&identity) {
                warn!(record = %record.display_string(), "skipping duplicate record");
                outcome.duplicates.push(record.display_string());
                continue;
            }
            seen.insert(identity.clone());

            let candidate = resolve_tag(&record.tags, self.name_tag, fallback);
            let name = allocator.allocate(&candidate);

            outcome.instances.push(
                Instance::new(self.spec.tf_type, name, identity)
                    .with_region(record.region.clone())
                    .with_references(record.references.clone()),
            );
        }

        debug!(
            resource_type = self.resource_type(),
            instances = outcome.instances.len(),
            duplicates = outcome.duplicates.len(),
            issued = ?allocator.issued(),
            "enumeration pass complete"
        );

        Ok(outcome)
    }

    /// Validate a record and build its identity, returning the naming fallback with it
    fn check<'r>(&self, record: &'r RawResource) -> ImportResult<(&'r str, Identity)> {
        if record.resource_type != self.spec.tf_type {
            return Err(ImportError::InvalidInput(format!(
                "{} passed to the {} pass",
                record.display_string(),
                self.spec.tf_type
            )));
        }

        let fallback = record.fallback_name().ok_or_else(|| {
            ImportError::InvalidInput(format!(
                "{} record has neither an id nor a name",
                self.spec.tf_type
            ))
        })?;

        Ok((fallback, self.spec.identity_for(record)?))
    }
}

/// Result of one enumeration pass
#[derive(Debug, Default)]
pub struct PassOutcome {
    pub instances: Vec<Instance>,
    /// Records skipped because an earlier record had the same identity
    pub duplicates: Vec<String>,
}

/// Everything needed to generate import configuration
#[derive(Debug)]
pub struct ImportPlan {
    /// Where the records came from
    pub source: String,
    /// Instances in enumeration order, grouped by resource type
    pub instances: Vec<Instance>,
    pub links: Vec<ResourceLink>,
    pub unresolved: Vec<UnresolvedReference>,
    /// Resource types whose records were skipped
    pub skipped_types: Vec<String>,
}

impl ImportPlan {
    /// Resource types in the order they were first enumerated
    pub fn resource_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();

        for instance in &self.instances {
            if !types.contains(&instance.resource_type()) {
                types.push(instance.resource_type());
            }
        }

        types
    }

    pub fn instances_of<'p>(&'p self, resource_type: &'p str) -> impl Iterator<Item = &'p Instance> {
        self.instances
            .iter()
            .filter(move |i| i.resource_type() == resource_type)
    }
}

/// Orchestrates enumeration, naming, identity, and linking
pub struct ImportWorkflow<'a> {
    options: ImportOptions,
    output: &'a dyn Output,
}

impl<'a> ImportWorkflow<'a> {
    pub fn new(options: ImportOptions, output: &'a dyn Output) -> Self {
        Self { options, output }
    }

    /// Enumerate all records and build the import plan.
    ///
    /// Each resource type gets its own pass with a fresh allocator, since
    /// Terraform labels only need to be unique per type.
    pub fn plan(&self, enumerator: &dyn ResourceEnumerator) -> ImportResult<ImportPlan> {
        self.output.section("Import Plan");
        self.output
            .info(&format!("Enumerating resources from {}", enumerator.source()));

        let records = enumerator.enumerate()?;
        self.output
            .success(&format!("Loaded {} resource records", records.len()));

        let mut instances = Vec::new();
        let mut skipped_types = Vec::new();

        for (resource_type, group) in group_by_type(records) {
            if !resource_types::is_supported(&resource_type) && self.options.skip_unsupported {
                warn!(resource_type = %resource_type, records = group.len(), "skipping unsupported type");
                self.output.warning(&format!(
                    "Skipping {} record(s) of unsupported type {}",
                    group.len(),
                    resource_type
                ));
                skipped_types.push(resource_type);
                continue;
            }

            let pass = EnumerationPass::new(&resource_type, &self.options.name_tag)?;
            let mut allocator = NameAllocator::new(self.options.name_format);
            let outcome = pass.run(&group, &mut allocator)?;

            for duplicate in &outcome.duplicates {
                self.output.warning(&format!(
                    "Skipping duplicate record {} (same identity as an earlier record)",
                    duplicate
                ));
            }

            self.output.success(&format!(
                "{}: {} instance(s)",
                resource_type,
                outcome.instances.len()
            ));
            instances.extend(outcome.instances);
        }

        let (links, unresolved) = link_instances(&instances);

        if !links.is_empty() {
            self.output
                .info(&format!("Linked {} reference(s) between instances", links.len()));
        }

        for missing in &unresolved {
            self.output.warning(&format!(
                "{} references {} {} which is not in the inventory",
                missing.from, missing.reference.resource_type, missing.reference.resource_id
            ));
        }

        Ok(ImportPlan {
            source: enumerator.source().to_string(),
            instances,
            links,
            unresolved,
            skipped_types,
        })
    }
}

/// Group records by resource type, keeping first-seen type order
fn group_by_type(records: Vec<RawResource>) -> Vec<(String, Vec<RawResource>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<RawResource>)> = Vec::new();

    for record in records {
        match index.get(&record.resource_type) {
            Some(&position) => groups[position].1.push(record),
            None => {
                index.insert(record.resource_type.clone(), groups.len());
                groups.push((record.resource_type.clone(), vec![record]));
            }
        }
    }

    groups
}
