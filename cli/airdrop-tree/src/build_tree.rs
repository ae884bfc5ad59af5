use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use airdrop_tree::{run_build, BuildConfig};

#[derive(Args, Debug)]
pub struct Cli {
    /// Directory holding sponsors.json, creators.json, foss.json, naming.json and faucet.json
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Directory receiving tree.bin, proof.json and summary.json
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Reward paid per faucet share
    #[arg(short, long, env = "AIRDROP_UNIT_REWARD")]
    unit_reward: u64,

    /// Print the summary document instead of the human-readable report
    #[arg(long)]
    json: bool,
}

impl From<&Cli> for BuildConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            input_dir: cli.input_dir.clone(),
            output_dir: cli.output_dir.clone(),
            unit_reward: cli.unit_reward,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = BuildConfig::from(&cli);
    let summary = run_build(&config).with_context(|| {
        format!(
            "Failed to build airdrop tree from {}",
            config.input_dir.display()
        )
    })?;

    if cli.json {
        print!("{}", summary.to_json().context("Failed to serialize summary")?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}
