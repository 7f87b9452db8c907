use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use essay_service::{build_app, config::AppConfig, run_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    if config.api_key.trim().is_empty() {
        warn!("GEMINI_API_KEY is not set; every analysis will return an error message");
    }
    info!(
        version = env!("CARGO_PKG_VERSION"),
        model = %config.model,
        timeout_ms = config.timeout_ms,
        "starting essay service"
    );

    let app = build_app(AppState::from_config(&config));
    run_server(app, config.port)
        .await
        .with_context(|| format!("server on port {} failed", config.port))
}
