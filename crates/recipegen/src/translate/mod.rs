//! Translation with fallback to the source text.
//!
//! [`Translator`] never fails: when the backend is unreachable, slow, or
//! answers with something unusable, the English text is returned unchanged
//! and a warning is logged.

mod libre;

#[cfg(test)]
mod fake;

pub use libre::LibreTranslateBackend;

#[cfg(test)]
pub use fake::FakeBackend;

use async_trait::async_trait;
use recipegen_core::request::Language;
use recipegen_core::translate::TranslateFailure;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Translation request failed: {0}")]
    Transport(String),

    #[error("Translation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Translation service returned status {0}")]
    Status(u16),

    #[error("Unusable translation response: {0}")]
    Response(#[from] TranslateFailure),
}

/// A service that translates English text into a target language.
#[async_trait]
pub trait TranslationBackend: Send + Sync + fmt::Debug {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError>;

    fn backend_name(&self) -> &'static str;
}

/// Text ready to show, and whether it actually went through translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub text: String,
    pub translated: bool,
}

impl Rendered {
    fn untranslated(text: String) -> Self {
        Self {
            text,
            translated: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Translator {
    backend: Arc<dyn TranslationBackend>,
}

impl Translator {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self { backend }
    }

    /// Translate `text` into `target`, or hand it back unchanged.
    ///
    /// English targets never reach the backend.
    pub async fn translate(&self, text: String, target: Language) -> Rendered {
        if !target.needs_translation() {
            return Rendered::untranslated(text);
        }

        match self.backend.translate(&text, target).await {
            Ok(translated) => Rendered {
                text: translated,
                translated: true,
            },
            Err(e) => {
                log::warn!(
                    "{} translation to {} failed, showing English text: {}",
                    self.backend.backend_name(),
                    target.code(),
                    e
                );
                Rendered::untranslated(text)
            }
        }
    }
}
