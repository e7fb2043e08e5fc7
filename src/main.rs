mod commands;
mod config;
mod dry_run;
mod google;
mod taskwarrior;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "twgcals")]
#[command(about = "Create Taskwarrior tasks for your upcoming Google Calendar events")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/twgcals/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tasks for upcoming events (default)
    Sync {
        /// Only show which tasks would be created
        #[arg(long)]
        dry_run: bool,
    },
    /// Authorize with Google again and replace the cached tokens
    Auth,
    /// List calendars with the project and tags they map to
    Calendars,
    /// Print the effective configuration
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let cfg = AppConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Sync { dry_run: false }) {
        Commands::Sync { dry_run } => commands::sync::run(&cfg, dry_run).await,
        Commands::Auth => commands::auth::run(&cfg).await,
        Commands::Calendars => commands::calendars::run(&cfg).await,
        Commands::Config => commands::config::run(&cfg, cli.config.as_deref()),
    }
}

/// Logs go to stderr so stdout stays readable.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,twgcals={level},twgcals_core={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))?;

    Ok(())
}
