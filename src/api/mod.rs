mod handlers;
mod models;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use handlers::{analyze, get_topic, index, not_found};
pub use models::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, TopicResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get_topic", get(get_topic))
        .route("/analyze", post(analyze))
        .fallback(not_found)
        .with_state(state)
}
