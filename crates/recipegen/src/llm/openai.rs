//! OpenAI chat completions provider.

use super::{ApiKey, CompletionProvider, LlmError};
use async_trait::async_trait;
use recipegen_core::completion::{parse_chat_response, ChatRequest};
use std::time::Duration;

#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: ApiKey,
    model: String,
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(
        api_key: ApiKey,
        model: String,
        url: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            model,
            url,
            timeout,
            client,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest::recipe(prompt, &self.model);

        log::debug!(
            "POST {} model={} prompt_chars={}",
            self.url,
            self.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        log::debug!("completion status={} body_bytes={}", status, body.len());

        Ok(parse_chat_response(status, &body)?)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
