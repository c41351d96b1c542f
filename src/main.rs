// src/main.rs — PageTurner assistant entry point

use clap::Parser;

use pageturner::cli::{Cli, Commands};
use pageturner::infra::config::Config;
use pageturner::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Some(Commands::Serve { port }) => pageturner::cli::serve::run_serve(&config, port).await,
        Some(Commands::Stats) => pageturner::cli::stats::show_stats(&config),
        Some(Commands::Chat { no_delay, ephemeral }) => {
            pageturner::cli::chat::run_chat(&config, no_delay, ephemeral).await
        }
        None => pageturner::cli::chat::run_chat(&config, false, false).await,
    }
}
