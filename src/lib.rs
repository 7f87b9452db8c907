pub mod analyzer;
pub mod api;
pub mod config;
pub mod model;
pub mod topics;

use std::sync::Arc;

use axum::Router;
use tracing::info;

use analyzer::EssayAnalyzer;
use config::AppConfig;
use model::GeminiClient;
use topics::TopicCatalog;

/// Shared, read-only handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<EssayAnalyzer>,
    pub topics: TopicCatalog,
}

impl AppState {
    pub fn new(analyzer: EssayAnalyzer, topics: TopicCatalog) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            topics,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let client = GeminiClient::new(
            &config.base_url,
            &config.api_key,
            &config.model,
            config.timeout_ms,
        );
        let analyzer = EssayAnalyzer::new(Arc::new(client), config.prompt_template.clone());
        Self::new(analyzer, TopicCatalog::builtin())
    }
}

pub fn build_app(state: AppState) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await
}
