// crates/hatchery-cli/src/main.rs
//
// CLI entrypoint for the Hatchery simulator.
//
// Provides subcommands for replaying an egg-economy scenario week by week
// and for printing fee-share projections.

mod commands;
mod config;
mod output;
mod scenario;

use clap::{Parser, Subcommand};
use commands::project::ProjectCmd;
use commands::simulate::SimulateCmd;
use config::CliConfig;
use output::OutputFormat;

/// Hatchery — tokenomics egg-economy simulator.
#[derive(Parser, Debug)]
#[command(
    name = "hatchery",
    version = "0.1.0",
    about = "Simulate egg emission, rot and hatching, and project fee earnings"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "hatchery.toml")]
    config: String,

    /// Log level override: trace, debug, info, warn, error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a scenario file against the egg-economy engine.
    Simulate(SimulateCmd),

    /// Fee-share projections: supply, passive, active.
    #[command(subcommand)]
    Project(ProjectCmd),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(&cli.config);
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing subscriber; RUST_LOG takes precedence.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !config.loaded {
        tracing::warn!("No configuration at {}. Using defaults.", cli.config);
    } else {
        tracing::info!("Loaded configuration from {}", cli.config);
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    match &cli.command {
        Commands::Simulate(cmd) => commands::simulate::run(cmd, format)?,
        Commands::Project(cmd) => commands::project::run(cmd, &config.projection, format)?,
    }

    Ok(())
}
