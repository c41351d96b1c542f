// src/cli/serve.rs — HTTP API server command

use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::analytics::AnalyticsLog;
use crate::catalog::Catalog;
use crate::infra::config::Config;

pub async fn run_serve(config: &Config, port: Option<u16>) -> anyhow::Result<()> {
    let mut api_config = config.api.clone();
    if let Some(port) = port {
        api_config.port = port;
    }

    let catalog = Arc::new(Catalog::new()?);
    let responder = super::build_responder(config, catalog.clone());
    let analytics = Arc::new(AnalyticsLog::new(None));

    let state = ApiState::new(catalog, responder, analytics);
    api::start_server(&api_config, state).await
}
