use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use crate::analyzer::AnalyzeError;
use crate::AppState;

use super::models::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, TopicResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn get_topic(State(state): State<AppState>) -> Json<TopicResponse> {
    Json(TopicResponse {
        topic: state.topics.random_topic().to_string(),
    })
}

/// Backend failures still answer 200: the error text travels in `analysis`
/// prefixed with [`crate::analyzer::ERROR_MARKER`].
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(status = %rejection.status(), "rejected analyze body");
            return (
                rejection.status(),
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    let result = state
        .analyzer
        .analyze(payload.essay.as_deref(), payload.topic.as_deref())
        .await;

    match result {
        Ok(analysis) => {
            info!(chars = analysis.len(), "analysis returned");
            (StatusCode::OK, Json(AnalyzeResponse { analysis })).into_response()
        }
        Err(err @ AnalyzeError::EmptyEssay) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
        Err(err @ AnalyzeError::Model(_)) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                analysis: err.analysis_text(),
            }),
        )
            .into_response(),
    }
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
