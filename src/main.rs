mod cli;
mod config;
mod dataset;
mod embedding;
mod github;
mod gitclone;
mod miner;
mod patterns;
mod textclean;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "quarry",
    version,
    about = "Mine GitHub for GoF design-pattern samples and embed them with local models"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search GitHub, clone matching repositories, and build the dataset
    Mine,
    /// Generate embeddings for every dataset sample with each configured model
    Embed,
    /// Check dataset quality: duplicates, trivial samples, label distribution
    Validate {
        /// Delete redundant duplicate copies (keeps the first of each group)
        #[arg(long)]
        remove_duplicates: bool,
        /// With --remove-duplicates, only print what would be deleted
        #[arg(long)]
        dry_run: bool,
        /// Write the full report as JSON to this path
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Show per-pattern sample counts
    Stats,
    /// Check external dependencies: token, git, embedding server, models
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::QuarryConfig::load()?;

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for reports and piping.
    let filter = EnvFilter::try_new(&config.log.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Mine => {
            cli::mine::mine(&config).await?;
        }
        Command::Embed => {
            cli::embed::embed(&config).await?;
        }
        Command::Validate {
            remove_duplicates,
            dry_run,
            export,
        } => {
            cli::validate::run(&config, remove_duplicates, dry_run, export.as_deref())?;
        }
        Command::Stats => {
            cli::stats::stats(&config)?;
        }
        Command::Doctor => {
            cli::doctor::doctor(&config).await?;
        }
    }

    Ok(())
}
