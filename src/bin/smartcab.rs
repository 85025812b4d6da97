//! smartcab CLI - Train and evaluate a Q-learning driving agent
//!
//! This CLI provides:
//! - Driving trips on the reference grid with a chosen policy
//! - Comparing the random baseline with Q-learning on identical trips

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "smartcab")]
#[command(version, about = "Q-learning agent for a turn-based smartcab grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive trips with one policy and report performance
    Run(Box<smartcab::cli::commands::run::RunArgs>),

    /// Compare the random baseline with Q-learning
    Compare(smartcab::cli::commands::compare::CompareArgs),
}

fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smartcab=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => smartcab::cli::commands::run::execute(*args),
        Commands::Compare(args) => smartcab::cli::commands::compare::execute(args),
    }
}
