//! Infrastructure Import Module
//!
//! Turns enumerated AWS resources into OpenTofu/Terraform import blocks:
//!
//! - Resolving display names from resource tags
//! - Allocating unique, label-safe names per resource type
//! - Carrying single-key and composite identities
//! - Linking references between imported resources
//! - Generating import blocks and a JSON instance listing
//!
//! # Usage
//!
//! ```bash
//! # Plan and write _imports.tf + instances.json
//! tfimport import ./inventory.yaml --output ./imported
//!
//! # Keep tag names as-is and only print the result
//! tfimport import ./inventory/ --name-format verbatim --dry-run
//! ```
//!
//! # OpenTofu Import Workflow
//!
//! 1. Generate import blocks in `_imports.tf`:
//!    ```hcl
//!    import {
//!      to = aws_instance.web
//!      id = "i-111"
//!    }
//!    ```
//!
//! 2. Run `tofu plan -generate-config-out=generated.tf` to generate resource config
//!
//! 3. Run `tofu apply` to import resources into state

pub mod config_generator;
pub mod discovery;
pub mod error;
pub mod identity;
pub mod inventory;
pub mod links;
pub mod naming;
pub mod resource_types;
mod scalar;
pub mod tags;
pub mod workflow;

// Re-export commonly used types
pub use config_generator::{ConfigGenerator, GeneratorConfig};
pub use inventory::InventoryEnumerator;
pub use naming::NameFormat;
pub use workflow::{ImportOptions, ImportWorkflow};
