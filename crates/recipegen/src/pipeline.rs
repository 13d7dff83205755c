//! Compose, generate, translate, export.
//!
//! One pass per "Generate Recipes" action. A completion failure stops the
//! pass before any translation or export work; an export failure does not
//! hide the recipe text, it only travels alongside it.

use std::fmt;
use std::sync::Arc;

use pdf::PdfError;
use recipegen_core::prompt;
use recipegen_core::request::{Language, RecipeRequest};

use crate::config::Config;
use crate::error::Error;
use crate::llm::{create_provider, ApiKey, CompletionProvider, LlmError};
use crate::prelude::*;
use crate::translate::{LibreTranslateBackend, Rendered, Translator};

/// Turns the displayed text into a downloadable document.
pub trait DocumentExporter: Send + Sync + fmt::Debug {
    fn export(&self, text: &str) -> Result<Vec<u8>, PdfError>;
}

#[derive(Debug, Default)]
pub struct PdfExporter;

impl DocumentExporter for PdfExporter {
    fn export(&self, text: &str) -> Result<Vec<u8>, PdfError> {
        pdf::export(text)
    }
}

/// The outside world as the pipeline sees it.
pub trait Services: Send + Sync {
    /// A completion provider bound to this request's API key.
    fn completion(&self, api_key: ApiKey) -> Result<Arc<dyn CompletionProvider>, LlmError>;

    fn translator(&self) -> &Translator;

    fn exporter(&self) -> &dyn DocumentExporter;
}

#[derive(Debug)]
pub struct LiveServices {
    config: Config,
    translator: Translator,
    exporter: PdfExporter,
}

impl LiveServices {
    pub fn new(config: Config) -> Result<Self> {
        let backend =
            LibreTranslateBackend::new(config.translate_url.clone(), config.translate_timeout)
                .map_err(|e| eyre!("Failed to set up the translation client: {e}"))?;

        Ok(Self {
            config,
            translator: Translator::new(Arc::new(backend)),
            exporter: PdfExporter,
        })
    }
}

impl Services for LiveServices {
    fn completion(&self, api_key: ApiKey) -> Result<Arc<dyn CompletionProvider>, LlmError> {
        create_provider(&self.config, api_key).map(Arc::from)
    }

    fn translator(&self) -> &Translator {
        &self.translator
    }

    fn exporter(&self) -> &dyn DocumentExporter {
        &self.exporter
    }
}

/// The result of a successful generation.
#[derive(Debug)]
pub struct Generated {
    pub prompt: String,
    pub language: Language,
    pub rendered: Rendered,
    /// PDF bytes of `rendered.text`, or why they could not be produced.
    pub document: Result<Vec<u8>, PdfError>,
}

impl Generated {
    pub fn text(&self) -> &str {
        &self.rendered.text
    }

    pub fn export_error(&self) -> Option<Error> {
        self.document
            .as_ref()
            .err()
            .map(|e| Error::Export(e.to_string()))
    }
}

/// Run one generation for `request`.
pub async fn run(
    services: &dyn Services,
    api_key: ApiKey,
    request: &RecipeRequest,
) -> Result<Generated, LlmError> {
    let prompt = prompt::compose(request);

    let provider = services.completion(api_key)?;
    log::debug!(
        "generating with {}/{} (servings={}, cuisines={}, language={})",
        provider.provider_name(),
        provider.model_name(),
        request.servings,
        request.cuisines.len(),
        request.output_language.code()
    );

    let text = provider.complete(&prompt).await?;

    let rendered = services
        .translator()
        .translate(text, request.output_language)
        .await;

    let document = services.exporter().export(&rendered.text);
    if let Err(e) = &document {
        log::warn!("PDF export failed: {}", e);
    }

    Ok(Generated {
        prompt,
        language: request.output_language,
        rendered,
        document,
    })
}


#[cfg(test)]
mod tests {
    use super::fakes::FakeServices;
    use super::*;
    use crate::llm::FakeProvider;
    use crate::translate::FakeBackend;
    use recipegen_core::request::{Cuisine, Diet};

    fn key() -> ApiKey {
        ApiKey::new("sk-test").unwrap()
    }

    fn request(language: Language) -> RecipeRequest {
        RecipeRequest {
            ingredients: "tomato, paneer, rice".to_string(),
            cuisines: vec![Cuisine::Indian],
            diet: Diet::Vegetarian,
            output_language: language,
            ..RecipeRequest::default()
        }
    }

    #[tokio::test]
    async fn test_english_generation_exports_the_text() {
        let services = FakeServices::replying("Recipe 1\nRecipe 2");

        let generated = run(&services, key(), &request(Language::English))
            .await
            .unwrap();

        assert_eq!(generated.text(), "Recipe 1\nRecipe 2");
        assert!(!generated.rendered.translated);
        assert_eq!(services.backend.calls(), 0);
        assert_eq!(services.exporter.calls(), 1);

        let bytes = generated.document.as_ref().unwrap();
        assert_eq!(pdf::read_lines(bytes).unwrap(), vec!["Recipe 1", "Recipe 2"]);
    }

    #[tokio::test]
    async fn test_prompt_reaches_the_provider() {
        let services = FakeServices::new(
            FakeProvider::default().add_response("'Vegetarian' dietary rules", "veg recipes"),
            FakeBackend::failing(),
        );
        let generated = run(&services, key(), &request(Language::English))
            .await
            .unwrap();
        assert_eq!(generated.text(), "veg recipes");

        let prompts = services.provider.prompts();
        assert_eq!(prompts, vec![generated.prompt.clone()]);
        assert!(generated.prompt.contains("tomato, paneer, rice"));
        assert!(generated.prompt.contains("Indian cuisine"));
        assert!(generated.prompt.contains("Vegetarian"));
    }

    #[tokio::test]
    async fn test_completion_failure_stops_before_translate_and_export() {
        let services = FakeServices::new(
            FakeProvider::failing("quota exceeded"),
            FakeBackend::with_translation("unused"),
        );

        let err = run(&services, key(), &request(Language::French))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(services.backend.calls(), 0);
        assert_eq!(services.exporter.calls(), 0);
    }

    #[tokio::test]
    async fn test_translation_failure_shows_english() {
        let services = FakeServices::replying("Recipe 1");

        let generated = run(&services, key(), &request(Language::German))
            .await
            .unwrap();

        assert_eq!(generated.text(), "Recipe 1");
        assert!(!generated.rendered.translated);
        assert_eq!(services.backend.calls(), 1);
        assert!(generated.document.is_ok());
    }

    #[tokio::test]
    async fn test_hindi_text_is_shown_but_not_exported() {
        let services = FakeServices::new(
            FakeProvider::with_response("Recipe 1: Dal Tadka"),
            FakeBackend::with_translation("नुस्खा 1: दाल तड़का"),
        );

        let generated = run(&services, key(), &request(Language::Hindi))
            .await
            .unwrap();

        assert_eq!(generated.text(), "नुस्खा 1: दाल तड़का");
        assert!(generated.rendered.translated);
        assert_eq!(services.exporter.calls(), 1);
        assert!(matches!(
            generated.document,
            Err(PdfError::Encoding { line: 1, .. })
        ));
        assert!(matches!(generated.export_error(), Some(Error::Export(_))));
    }

    #[tokio::test]
    async fn test_api_key_is_handed_to_the_provider_factory() {
        let services = FakeServices::replying("ok");
        run(&services, key(), &request(Language::English))
            .await
            .unwrap();
        assert_eq!(services.keys.lock().unwrap().as_slice(), &[key()]);
    }
}
