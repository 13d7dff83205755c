//! Chat-completion wire format
//!
//! Request construction and response parsing for an OpenAI-compatible
//! `/chat/completions` endpoint. The HTTP call itself lives in the shell; this
//! module only turns a prompt into a request body and a status + body pair
//! into text or a typed failure.

use serde::{Deserialize, Serialize};

/// System message that frames every conversation.
pub const SYSTEM_ROLE: &str = "You are a creative, friendly recipe expert.";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Generation budget in tokens.
pub const MAX_TOKENS: u32 = 1200;

/// Sampling temperature.
pub const TEMPERATURE: f32 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatRequest {
    /// The two-message recipe conversation with the fixed sampling parameters.
    pub fn recipe(prompt: &str, model: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::system(SYSTEM_ROLE), ChatMessage::user(prompt)],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Why a completion response could not be turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionFailure {
    /// 401/403: the key is missing, malformed or revoked.
    Unauthorized(String),
    /// 429 from the service.
    RateLimited(String),
    /// Any other non-success status.
    Status { status: u16, message: String },
    /// 2xx with a body we cannot use.
    Malformed(String),
}

/// Interpret a completion response.
///
/// Error bodies in the `{"error": {"message": ...}}` shape contribute their
/// message; anything else is passed through as raw text.
pub fn parse_chat_response(status: u16, body: &str) -> Result<String, CompletionFailure> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        return Err(match status {
            401 | 403 => CompletionFailure::Unauthorized(message),
            429 => CompletionFailure::RateLimited(message),
            status => CompletionFailure::Status { status, message },
        });
    }

    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionFailure::Malformed(format!("invalid JSON: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionFailure::Malformed("response has no message content".to_string()))
}
