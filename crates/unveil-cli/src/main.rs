use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unveil_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "unveil")]
#[command(author, version, about = "Replay harness for scroll-triggered reveal scheduling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ~/.config/unveil/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script of host events and print the reveal timeline
    Simulate {
        /// Replay script (TOML)
        script: PathBuf,
        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
        /// Drive real tokio timers instead of a virtual clock
        #[arg(long)]
        realtime: bool,
    },
    /// Show the effective configuration
    Config {
        /// Only print the configuration file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Simulate {
            script,
            json,
            realtime,
        } => commands::simulate::run(&config, &script, json, realtime).await,
        Commands::Config { path } => commands::config::run(&config, cli.config.as_deref(), path),
    }
}
