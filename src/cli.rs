use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tempest attribution-constrained stochastic weather generator.
#[derive(Parser)]
#[command(
    name = "tempest",
    version,
    about = "Attribution-constrained stochastic daily weather generator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Simulate an ensemble and write it to Parquet.
    Generate(GenerateArgs),
    /// Load basin parameters and report their diagnostics.
    Check(CheckArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "tempest.toml")]
    pub config: PathBuf,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override ensemble size from config.
    #[arg(short = 'n', long)]
    pub members: Option<u32>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "tempest.toml")]
    pub config: PathBuf,
}
