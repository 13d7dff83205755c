//! Fake completion provider for testing.

use super::{CompletionProvider, LlmError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Replies by prompt substring, falls back to a default reply, or always
/// fails. Records every prompt it sees.
#[derive(Debug, Default)]
pub struct FakeProvider {
    /// Prompt substring -> reply, checked in insertion order.
    responses: Vec<(String, String)>,
    response: Option<String>,
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            ..Self::default()
        }
    }

    /// Reply with `response` when the prompt contains `prompt_contains`.
    pub fn add_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_string(), response.to_string()));
        self
    }

    /// Every call fails with [`LlmError::RequestFailed`].
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(LlmError::RequestFailed(message.clone()));
        }

        let prompt_lower = prompt.to_lowercase();
        if let Some((_, response)) = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(&pattern.to_lowercase()))
        {
            return Ok(response.clone());
        }

        self.response.clone().ok_or_else(|| {
            LlmError::RequestFailed("FakeProvider: no response configured".to_string())
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_response_records_prompt() {
        let provider = FakeProvider::with_response("two recipes");
        assert_eq!(provider.complete("hello").await.unwrap(), "two recipes");
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.prompts(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_substring_match_wins_over_default() {
        let provider = FakeProvider::with_response("default")
            .add_response("Vegan", "vegan recipes")
            .add_response("thai", "thai recipes");

        assert_eq!(provider.complete("strict VEGAN rules").await.unwrap(), "vegan recipes");
        assert_eq!(provider.complete("Thai cuisine").await.unwrap(), "thai recipes");
        assert_eq!(provider.complete("anything else").await.unwrap(), "default");
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_no_match_and_no_default_fails() {
        let provider = FakeProvider::default().add_response("vegan", "vegan recipes");
        assert!(provider.complete("meat").await.is_err());
    }

    #[tokio::test]
    async fn test_failing() {
        let provider = FakeProvider::failing("service down");
        let err = provider.complete("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "API request failed: service down");
    }
}
