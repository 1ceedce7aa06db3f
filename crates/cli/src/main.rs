//! Cardio CLI
//!
//! A command-line interface for classifying patient records with the Cardio
//! rule engine and inspecting its rules.

mod commands;

use std::path::PathBuf;

use cardio_ops::OpsConfig;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Cardio CLI: cardiovascular risk classification.
#[derive(Parser, Debug)]
#[command(name = "cardio", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, env = "CARDIO_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a patient record.
    Classify(commands::classify::ClassifyArgs),
    /// Inspect the loaded rules.
    Rules(commands::rules::RulesArgs),
    /// Run a YAML scenario fixture against the loaded rules.
    Test(commands::test::TestArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = OpsConfig::load(cli.config.as_deref())?;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!(config = ?cli.config, "configuration loaded");

    match cli.command {
        Command::Classify(args) => commands::classify::run(config, &args, &cli.format),
        Command::Rules(args) => commands::rules::run(&config, &args, &cli.format),
        Command::Test(args) => commands::test::run(&config, &args, &cli.format),
    }
}
