//! matcache - cache matrix text files in Redis
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use matcache::cli::{Cli, Commands};
use matcache::config::ConfigManager;
use matcache::error::MatcacheResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> MatcacheResult<()> {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("matcache=warn"),
        1 => EnvFilter::new("matcache=info"),
        _ => EnvFilter::new("matcache=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    debug!("Using config {}", config_manager.path().display());
    let config = config_manager.load().await?;

    match cli.command {
        Commands::Process(args) => matcache::cli::commands::process(args, &config).await,
        Commands::Show(args) => matcache::cli::commands::show(args, &config).await,
        Commands::Config(args) => {
            matcache::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
