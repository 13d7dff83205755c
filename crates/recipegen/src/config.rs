use std::time::Duration;

use recipegen_core::translate::TIMEOUT_SECS;

/// Settings shared by every subcommand, resolved once from the global flags.
///
/// The API key is not part of this struct. It arrives with each request and
/// lives only as long as that request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub model: String,
    pub openai_base_url: String,
    pub translate_url: String,
    pub completion_timeout: Duration,
    pub translate_timeout: Duration,
    pub verbose: bool,
}

impl Config {
    pub fn from_global(global: &crate::Global) -> Self {
        Self {
            model: global.model.trim().to_string(),
            openai_base_url: global.openai_base_url.trim_end_matches('/').to_string(),
            translate_url: global.translate_url.trim().to_string(),
            completion_timeout: Duration::from_secs(global.completion_timeout.max(1)),
            translate_timeout: Duration::from_secs(TIMEOUT_SECS),
            verbose: global.verbose,
        }
    }

    /// Full URL of the chat completions endpoint.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.openai_base_url)
    }
}
