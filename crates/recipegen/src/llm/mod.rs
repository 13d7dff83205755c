//! Completion provider abstraction.
//!
//! The pipeline only sees [`CompletionProvider`]; the live implementation
//! talks to an OpenAI-compatible chat endpoint and tests swap in
//! [`FakeProvider`].

mod openai;

#[cfg(test)]
mod fake;

pub use openai::OpenAiProvider;

#[cfg(test)]
pub use fake::FakeProvider;

use async_trait::async_trait;
use recipegen_core::completion::CompletionFailure;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

/// Error type for completion calls.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl From<CompletionFailure> for LlmError {
    fn from(failure: CompletionFailure) -> Self {
        match failure {
            CompletionFailure::Unauthorized(message) => LlmError::Authentication(message),
            CompletionFailure::RateLimited(message) => LlmError::RateLimited(message),
            CompletionFailure::Status { status, message } => LlmError::ApiError { status, message },
            CompletionFailure::Malformed(message) => LlmError::ParseError(message),
        }
    }
}

/// An OpenAI API key, held for one request and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// `None` when the input is blank.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Something that turns a prompt into recipe text.
///
/// Implementations are bound to one API key at construction and must be
/// thread-safe.
#[async_trait]
pub trait CompletionProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and get the assistant's reply.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name, e.g. `"openai"` or `"fake"`.
    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Build the live provider for one request.
pub fn create_provider(
    config: &Config,
    api_key: ApiKey,
) -> Result<Box<dyn CompletionProvider>, LlmError> {
    let provider = OpenAiProvider::new(
        api_key,
        config.model.clone(),
        config.chat_completions_url(),
        config.completion_timeout,
    )?;
    Ok(Box::new(provider))
}
