use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{ModelClient, ModelError};

type Reply = Box<dyn Fn() -> Result<String, ModelError> + Send + Sync>;

/// A scripted model for tests. Every call gets the same reply; prompts are
/// recorded so callers can assert on what was sent.
pub struct MockModelClient {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl MockModelClient {
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_reply(move || Ok(text.clone()))
    }

    pub fn failing(make_error: impl Fn() -> ModelError + Send + Sync + 'static) -> Self {
        Self::with_reply(move || Err(make_error()))
    }

    pub fn with_reply(
        reply: impl Fn() -> Result<String, ModelError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        (self.reply)()
    }

    fn model_id(&self) -> &str {
        "mock"
    }
}
