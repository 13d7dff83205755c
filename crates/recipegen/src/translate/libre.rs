//! LibreTranslate-compatible HTTP backend.

use super::{TranslateError, TranslationBackend};
use async_trait::async_trait;
use recipegen_core::request::Language;
use recipegen_core::translate::{extract_translated_text, TranslateForm};
use std::time::Duration;

#[derive(Debug)]
pub struct LibreTranslateBackend {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl LibreTranslateBackend {
    pub fn new(url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslateError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            url,
            timeout,
            client,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> TranslateError {
        if e.is_timeout() {
            TranslateError::Timeout(self.timeout)
        } else {
            TranslateError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl TranslationBackend for LibreTranslateBackend {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        log::debug!("POST {} target={}", self.url, target.code());

        let response = self
            .client
            .post(&self.url)
            .form(&TranslateForm::new(text, target))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        match extract_translated_text(&body) {
            Ok(translated) if status.is_success() => Ok(translated),
            Ok(_) => Err(TranslateError::Status(status.as_u16())),
            Err(failure) if !status.is_success() => {
                log::debug!("translation service error body: {}", failure);
                Err(TranslateError::Status(status.as_u16()))
            }
            Err(failure) => Err(failure.into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "libretranslate"
    }
}
