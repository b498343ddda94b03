use anyhow::Result;
use clap::Args;

use crate::context::Context;
use crate::infrastructure::resource_types::{self, ResourceTypeSpec};

/// List supported resource types and how they are identified
#[derive(Debug, Args)]
pub struct TypesCommand {
    /// Only show the given resource type
    #[arg(value_name = "TYPE")]
    resource_type: Option<String>,
}

impl TypesCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let specs = match &self.resource_type {
            Some(tf_type) => vec![resource_types::lookup(tf_type)?],
            None => resource_types::supported_types(),
        };

        ctx.output.section("Supported Resource Types");

        for spec in &specs {
            display_spec(ctx, spec);
        }

        ctx.output.blank();
        ctx.output
            .info(&format!("{} resource type(s)", specs.len()));

        Ok(())
    }
}

fn display_spec(ctx: &Context, spec: &ResourceTypeSpec) {
    ctx.output.subsection(spec.tf_type);
    ctx.output.key_value("Description", spec.description);

    if spec.is_composite() {
        ctx.output
            .key_value_highlight("Identity", "composite");
        ctx.output.key_value("Fields", &spec.fields().join(", "));
    } else {
        ctx.output.key_value_highlight("Identity", "id");
    }

    ctx.output.key_value("Import ID", spec.id_format());

    if !spec.importable() {
        ctx.output
            .warning("Not importable: no import ID format is known for this type");
    }
}
