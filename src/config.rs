use std::{env, fs, path::PathBuf};

use thiserror::Error;

use crate::analyzer::PromptTemplate;

pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read prompt template {}: {source}", .path.display())]
    PromptTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("prompt template {} has no {{topic}} placeholder", .path.display())]
    MissingPlaceholder { path: PathBuf },
}

/// Read once at startup. Not `Debug`: it carries the API key.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub prompt_template: PromptTemplate,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_key = non_blank_var("GEMINI_API_KEY")
            .or_else(|| non_blank_var("GOOGLE_API_KEY"))
            .unwrap_or_default();

        let model = non_blank_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url =
            non_blank_var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = env::var("MODEL_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let prompt_template = match env::var_os("ESSAY_PROMPT_FILE") {
            Some(path) => load_prompt_template(PathBuf::from(path))?,
            None => PromptTemplate::canonical(),
        };

        Ok(Self {
            port,
            api_key,
            model,
            base_url,
            timeout_ms,
            prompt_template,
        })
    }
}

/// Set-but-blank counts as unset.
fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn load_prompt_template(path: PathBuf) -> Result<PromptTemplate, ConfigError> {
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(ConfigError::PromptTemplate { path, source }),
    };
    PromptTemplate::new(text).ok_or(ConfigError::MissingPlaceholder { path })
}
