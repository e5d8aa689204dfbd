mod cli;
mod config;
mod errors;
mod export;
mod gateway;
mod http;
mod models;
mod notify;
mod persist;
mod practice;
mod resume;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ApiMode, Config};
use crate::gateway::live::HttpGateway;
use crate::gateway::mock::MockGateway;
use crate::gateway::QuestionGateway;
use crate::http::ApiClient;
use crate::persist::KvStore;
use crate::practice::PracticeEngine;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting IntelliView client v{}", env!("CARGO_PKG_VERSION"));

    // The gateway backend is fixed once here; the engine never knows which
    // one it is talking to.
    let gateway: Arc<dyn QuestionGateway> = match config.mode {
        ApiMode::Mock => {
            let store = match &config.data_dir {
                Some(dir) => KvStore::with_base_dir(dir)?,
                None => KvStore::open()?,
            };
            info!("Gateway: mock (synthesized data, local persistence)");
            Arc::new(MockGateway::new(store))
        }
        ApiMode::Live => {
            let base_url = config
                .api_base_url
                .clone()
                .context("live mode requires API_BASE_URL")?;
            info!("Gateway: live ({base_url})");
            Arc::new(HttpGateway::new(ApiClient::new(
                base_url,
                config.auth_token.clone(),
                Duration::from_millis(config.http_timeout_ms),
            )))
        }
    };

    let mut engine = PracticeEngine::new(gateway);
    engine.load_user_data().await;
    info!("User data loaded");

    cli::run(&mut engine).await
}
