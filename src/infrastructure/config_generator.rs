//! Import block generation
//!
//! Renders an import plan as an `_imports.tf` file of OpenTofu import blocks
//! and an `instances.json` listing for downstream tooling.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::discovery::Instance;
use super::error::{ImportError, ImportResult};
use super::links::{ResourceLink, UnresolvedReference};
use super::resource_types;
use super::workflow::ImportPlan;
use crate::traits::FileSystem;

/// File name of the generated import blocks
pub const IMPORTS_FILE: &str = "_imports.tf";

/// File name of the generated instance listing
pub const LISTING_FILE: &str = "instances.json";

lazy_static! {
    static ref TF_LABEL: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("Invalid label pattern regex");
}

/// Check a Terraform resource label
pub fn is_valid_label(label: &str) -> bool {
    TF_LABEL.is_match(label)
}

/// Generator settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Whether to start `_imports.tf` with an explanatory comment
    pub include_header: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

/// Rendered import blocks
#[derive(Debug)]
pub struct RenderedImports {
    pub text: String,
    /// Number of import blocks written
    pub blocks: usize,
    /// Addresses left out because the provider cannot import their type
    pub skipped: Vec<String>,
}

#[derive(Serialize)]
struct Listing<'a> {
    source: &'a str,
    instances: &'a [Instance],
    links: &'a [ResourceLink],
    unresolved: &'a [UnresolvedReference],
    skipped_types: &'a [String],
}

/// Renders import plans to files
pub struct ConfigGenerator {
    config: GeneratorConfig,
}

impl ConfigGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render `_imports.tf` for a plan
    pub fn render_imports(&self, plan: &ImportPlan) -> ImportResult<RenderedImports> {
        let mut text = String::new();
        let mut blocks = 0;
        let mut skipped = Vec::new();

        if self.config.include_header {
            text.push_str(&format!("# Generated by tfimport from {}\n", plan.source));
            text.push_str(
                "# Run `tofu plan -generate-config-out=generated.tf` to generate resource configuration.\n",
            );
        }

        for instance in &plan.instances {
            if !is_valid_label(instance.name()) {
                return Err(ImportError::InvalidInput(format!(
                    "'{}' is not a valid Terraform label; use --name-format terraform",
                    instance.address()
                )));
            }

            let spec = resource_types::lookup(instance.resource_type())?;
            let Some(import_id) = spec.import_id(instance)? else {
                skipped.push(instance.address());
                continue;
            };

            if !text.is_empty() {
                text.push('\n');
            }

            text.push_str(&render_block(instance, &import_id));
            blocks += 1;
        }

        Ok(RenderedImports {
            text,
            blocks,
            skipped,
        })
    }

    /// Render the JSON instance listing for a plan
    pub fn render_listing(&self, plan: &ImportPlan) -> ImportResult<String> {
        let listing = Listing {
            source: &plan.source,
            instances: &plan.instances,
            links: &plan.links,
            unresolved: &plan.unresolved,
            skipped_types: &plan.skipped_types,
        };

        Ok(serde_json::to_string_pretty(&listing)?)
    }

    /// Write both files into `dir`, returning the paths written
    pub fn write_files(
        &self,
        fs: &dyn FileSystem,
        plan: &ImportPlan,
        dir: &Path,
    ) -> ImportResult<(RenderedImports, Vec<PathBuf>)> {
        let rendered = self.render_imports(plan)?;
        let listing = self.render_listing(plan)?;

        let imports_path = dir.join(IMPORTS_FILE);
        let listing_path = dir.join(LISTING_FILE);

        fs.write(&imports_path, &rendered.text)
            .map_err(|e| ImportError::FileSystem(format!("{:#}", e)))?;
        fs.write(&listing_path, &format!("{}\n", listing))
            .map_err(|e| ImportError::FileSystem(format!("{:#}", e)))?;

        Ok((rendered, vec![imports_path, listing_path]))
    }
}

fn render_block(instance: &Instance, import_id: &str) -> String {
    format!(
        "import {{\n  to = {}\n  id = \"{}\"\n}}\n",
        instance.address(),
        escape_hcl(import_id)
    )
}

/// Escape a value for an HCL quoted string
fn escape_hcl(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("${", "$${")
        .replace("%{", "%%{")
}
