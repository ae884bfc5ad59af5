use anyhow::{Context, Result};
use clap::Args;

use airdrop_tree::{derive_leaf, hex_encode};

#[derive(Args, Debug)]
pub struct Cli {
    /// Address, with or without 0x prefix
    #[arg(short, long)]
    address: String,

    /// Committed value
    #[arg(short, long, allow_hyphen_values = true)]
    value: i128,

    /// Derive an externally funded leaf
    #[arg(short, long)]
    external: bool,
}

pub fn run(cli: &Cli) -> Result<()> {
    let leaf = derive_leaf(&cli.address, cli.value, cli.external)
        .with_context(|| format!("Failed to derive leaf for {}", cli.address))?;
    println!("{}", hex_encode(leaf));
    Ok(())
}
