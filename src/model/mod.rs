//! The external text-generation backend, behind a trait so handlers can be
//! exercised against a scripted stand-in.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;
pub use mock::MockModelClient;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode backend response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("backend response contained no text")]
    EmptyResponse,
}

/// One prompt in, one block of text out. No conversation state is kept
/// between calls, so implementations must be safe to share across requests.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    fn model_id(&self) -> &str;
}
