//! Fake translation backend for testing.

use super::{TranslateError, TranslationBackend};
use async_trait::async_trait;
use recipegen_core::request::Language;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeBackend {
    translation: Option<String>,
    targets: Mutex<Vec<Language>>,
    calls: AtomicUsize,
}

impl FakeBackend {
    /// Every call returns `translation`.
    pub fn with_translation(translation: &str) -> Self {
        Self {
            translation: Some(translation.to_string()),
            ..Self::default()
        }
    }

    /// Every call fails as if the service were down.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn targets(&self) -> Vec<Language> {
        self.targets.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationBackend for FakeBackend {
    async fn translate(&self, _text: &str, target: Language) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.targets.lock().unwrap().push(target);

        self.translation
            .clone()
            .ok_or_else(|| TranslateError::Transport("FakeBackend: service down".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}
