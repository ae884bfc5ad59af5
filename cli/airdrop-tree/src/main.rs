#![forbid(unsafe_code)]
#![allow(unreachable_pub)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod build_tree;
mod leaf;

#[derive(Parser, Debug)]
#[command(name = "airdrop-tree")]
#[command(about = "Airdrop leaf set and Merkle root builder", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the tree, proof and summary artifacts from the category files
    Build(build_tree::Cli),
    /// Derive a single leaf from its proof entry fields
    Leaf(leaf::Cli),
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Build(args) => build_tree::run(args)?,
        Commands::Leaf(args) => leaf::run(&args)?,
    }

    Ok(())
}
