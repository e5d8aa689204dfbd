use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which gateway backend the session runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Mock,
    Live,
}

impl FromStr for ApiMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mock" => Ok(ApiMode::Mock),
            "live" => Ok(ApiMode::Live),
            other => bail!("APP_MODE must be 'mock' or 'live', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables. The gateway
/// backend is fixed here, once, at startup; live mode additionally requires
/// the API base URL.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: ApiMode,
    /// Required in live mode, e.g. `https://api.example.com/api/v1`.
    pub api_base_url: Option<String>,
    pub auth_token: Option<String>,
    pub http_timeout_ms: u64,
    /// Overrides the platform data directory for the mock gateway's store.
    pub data_dir: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mode: ApiMode = std::env::var("APP_MODE")
            .unwrap_or_else(|_| "mock".to_string())
            .parse()?;

        let api_base_url = match mode {
            ApiMode::Live => Some(require_env("API_BASE_URL")?),
            ApiMode::Mock => std::env::var("API_BASE_URL").ok(),
        };

        Ok(Config {
            mode,
            api_base_url,
            auth_token: std::env::var("API_AUTH_TOKEN").ok(),
            http_timeout_ms: std::env::var("HTTP_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse::<u64>()
                .context("HTTP_TIMEOUT_MS must be a number of milliseconds")?,
            data_dir: std::env::var("DATA_DIR").ok().map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
