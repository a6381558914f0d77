use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Racer deterministic vehicle simulation.
#[derive(Parser)]
#[command(
    name = "racer",
    version,
    about = "Deterministic roller-racer vehicle simulation"
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
    /// Run a simulation and write CSV telemetry.
    Simulate(SimulateArgs),
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "racer.toml")]
    pub config: PathBuf,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override simulated duration (seconds) from config.
    #[arg(short, long)]
    pub duration: Option<f64>,
}
