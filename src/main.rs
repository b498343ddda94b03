mod commands;
mod context;
mod infrastructure;
mod output;
mod traits;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ImportCommand, TypesCommand};
use context::Context;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tfimport")]
#[command(about = "Turn enumerated AWS resources into uniquely named Terraform import blocks", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate import blocks from a resource inventory
    Import(ImportCommand),

    /// List supported resource types and how they are identified
    Types(TypesCommand),
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "tfimport=debug" } else { "tfimport=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::new();

    match cli.command {
        Commands::Import(cmd) => cmd.execute(&ctx)?,
        Commands::Types(cmd) => cmd.execute(&ctx)?,
    }

    Ok(())
}
