//! Translation wire format
//!
//! Payload and response handling for a LibreTranslate-compatible
//! `POST /translate` endpoint. Recipes are always generated in English, so the
//! source language is fixed.

use serde::Serialize;

use crate::request::Language;

/// Language the completion service writes in.
pub const SOURCE_LANGUAGE: &str = "en";

/// Default public endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://libretranslate.de/translate";

/// Seconds to wait for the translation service before falling back.
pub const TIMEOUT_SECS: u64 = 10;

/// Form fields of a translation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateForm<'a> {
    pub q: &'a str,
    pub source: &'static str,
    pub target: &'static str,
    pub format: &'static str,
}

impl<'a> TranslateForm<'a> {
    pub fn new(text: &'a str, target: Language) -> Self {
        Self {
            q: text,
            source: SOURCE_LANGUAGE,
            target: target.code(),
            format: "text",
        }
    }
}

/// Why a translation response was unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateFailure {
    /// Body is not JSON at all.
    NotJson(String),
    /// The service answered with `{"error": "..."}`.
    Service(String),
    /// JSON without a string `translatedText` field.
    MissingField,
}

impl std::fmt::Display for TranslateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateFailure::NotJson(msg) => write!(f, "response is not JSON: {}", msg),
            TranslateFailure::Service(msg) => write!(f, "service error: {}", msg),
            TranslateFailure::MissingField => write!(f, "response has no translatedText field"),
        }
    }
}

impl std::error::Error for TranslateFailure {}

/// Pull the translated text out of a response body.
pub fn extract_translated_text(body: &str) -> Result<String, TranslateFailure> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| TranslateFailure::NotJson(e.to_string()))?;

    if let Some(text) = value.get("translatedText").and_then(|v| v.as_str()) {
        return Ok(text.to_string());
    }

    match value.get("error").and_then(|v| v.as_str()) {
        Some(message) => Err(TranslateFailure::Service(message.to_string())),
        None => Err(TranslateFailure::MissingField),
    }
}
