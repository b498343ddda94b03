use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use crate::context::Context;
use crate::infrastructure::workflow::ImportPlan;
use crate::infrastructure::{
    ConfigGenerator, GeneratorConfig, ImportOptions, ImportWorkflow, InventoryEnumerator,
    NameFormat,
};

/// Generate import blocks from a resource inventory
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Inventory file (YAML or JSON) or a directory of inventory files
    inventory: PathBuf,

    /// Directory to write _imports.tf and instances.json into (defaults to current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tag key holding each resource's display name
    #[arg(long, env = "TFIMPORT_NAME_TAG", default_value = "Name")]
    name_tag: String,

    /// Name canonicalization: verbatim, underscore, terraform
    #[arg(long, env = "TFIMPORT_NAME_FORMAT", default_value = "terraform")]
    name_format: String,

    /// Skip records of unsupported resource types instead of failing
    #[arg(long)]
    skip_unsupported: bool,

    /// Omit the explanatory comment at the top of _imports.tf
    #[arg(long)]
    no_header: bool,

    /// Print the import blocks instead of writing files
    #[arg(long)]
    dry_run: bool,
}

impl ImportCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let options = self.options()?;
        let enumerator = InventoryEnumerator::new(ctx.fs.as_ref(), &self.inventory);
        let workflow = ImportWorkflow::new(options, ctx.output.as_ref());

        let plan = workflow
            .plan(&enumerator)
            .with_context(|| format!("Failed to plan import from {}", self.inventory.display()))?;

        if plan.instances.is_empty() {
            ctx.output.warning("Inventory contains no importable resources");
            return Ok(());
        }

        self.display_plan(ctx, &plan);

        let generator = ConfigGenerator::new(GeneratorConfig {
            include_header: !self.no_header,
        });

        if self.dry_run {
            let rendered = generator.render_imports(&plan)?;
            ctx.output.subsection(&format!("Import blocks (dry run, {})", rendered.blocks));
            ctx.output.dimmed(&rendered.text);
            self.report_skipped(ctx, &rendered.skipped);
            return Ok(());
        }

        let output_dir = self.output.clone().unwrap_or_else(|| PathBuf::from("."));
        let (rendered, files) = generator
            .write_files(ctx.fs.as_ref(), &plan, &output_dir)
            .context("Failed to write import files")?;

        for file in &files {
            ctx.output.success(&format!("Generated: {}", file.display()));
        }

        ctx.output
            .key_value("Import blocks", &rendered.blocks.to_string());

        self.report_skipped(ctx, &rendered.skipped);

        ctx.output.blank();
        ctx.output.info(&format!(
            "Next: run `tofu plan -generate-config-out=generated.tf` in {}",
            output_dir.display()
        ));

        Ok(())
    }

    fn options(&self) -> Result<ImportOptions> {
        let name_format = NameFormat::from_str(&self.name_format).with_context(|| {
            format!(
                "Unknown name format '{}' (expected verbatim, underscore, or terraform)",
                self.name_format
            )
        })?;

        if self.name_tag.is_empty() {
            anyhow::bail!("--name-tag must not be empty");
        }

        Ok(ImportOptions {
            name_tag: self.name_tag.clone(),
            name_format,
            skip_unsupported: self.skip_unsupported,
        })
    }

    fn display_plan(&self, ctx: &Context, plan: &ImportPlan) {
        ctx.output.subsection("Instances");

        for resource_type in plan.resource_types() {
            for instance in plan.instances_of(resource_type) {
                let identity = match (instance.id(), instance.composite_id()) {
                    (Some(id), _) => id.to_string(),
                    (None, Some(fields)) => fields
                        .keys()
                        .map(|k| format!("{}={}", k, fields.decode(k).0))
                        .collect::<Vec<_>>()
                        .join(", "),
                    (None, None) => String::new(),
                };

                ctx.output.key_value(&instance.address(), &identity);
            }
        }
    }

    fn report_skipped(&self, ctx: &Context, skipped: &[String]) {
        for address in skipped {
            ctx.output.warning(&format!(
                "{} cannot be imported by the provider and was left out of the import blocks",
                address
            ));
        }
    }
}
