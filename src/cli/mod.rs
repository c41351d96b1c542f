// src/cli/mod.rs — CLI definition (clap derive)

pub mod chat;
pub mod serve;
pub mod stats;

use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::infra::config::Config;
use crate::responder::{EngineResponder, FallbackResponder, Responder, WebhookResponder};

#[derive(Parser)]
#[command(name = "pageturner", about = "PageTurner Books store assistant", version)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat with the store assistant
    Chat {
        /// Reply immediately instead of simulating a typing pace
        #[arg(long)]
        no_delay: bool,
        /// Don't persist history or context to disk
        #[arg(long)]
        ephemeral: bool,
    },
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show store and chat-log statistics
    Stats,
}

/// Assemble the responder chain from config: remote webhook first when
/// a URL is configured, local intent engine as the always-on fallback.
pub fn build_responder(config: &Config, catalog: Arc<Catalog>) -> Arc<dyn Responder> {
    let local: Arc<dyn Responder> = Arc::new(EngineResponder::new(catalog));
    let remote: Option<Arc<dyn Responder>> = config.webhook.url.as_ref().map(|url| {
        Arc::new(WebhookResponder::new(
            url.clone(),
            Duration::from_secs(config.webhook.timeout_seconds),
        )) as Arc<dyn Responder>
    });
    Arc::new(FallbackResponder::new(remote, local))
}
