use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use recipegen_core::session::{Action, Effect, Session};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::args::RequestArgs;
use crate::config::Config;
use crate::llm::ApiKey;
use crate::pipeline::{self, Generated, LiveServices};

#[derive(Debug, clap::Parser)]
#[command(name = "generate")]
#[command(about = "Generate recipes once from the command line")]
pub struct App {
    #[clap(flatten)]
    request: RequestArgs,

    /// OpenAI API key, used for this run only and never stored
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, value_parser = parse_api_key)]
    api_key: Option<ApiKey>,

    /// Save the recipes as PDF to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn parse_api_key(raw: &str) -> std::result::Result<ApiKey, String> {
    ApiKey::new(raw).ok_or_else(|| "API key cannot be blank".to_string())
}

#[derive(Debug, Serialize)]
pub struct GenerateOutput<'a> {
    pub language: &'static str,
    pub translated: bool,
    pub text: &'a str,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_error: Option<Error>,
}

impl<'a> GenerateOutput<'a> {
    pub fn new(generated: &'a Generated, saved: Option<&Path>) -> Self {
        Self {
            language: generated.language.code(),
            translated: generated.rendered.translated,
            text: generated.text(),
            prompt: &generated.prompt,
            pdf: saved.map(|p| p.display().to_string()),
            export_error: generated.export_error(),
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = Config::from_global(&global);
    let request = app.request.to_request();

    let mut session = Session::new();
    let effect = session.dispatch(Action::Generate {
        has_api_key: app.api_key.is_some(),
    });
    let api_key = match (effect, app.api_key) {
        (Effect::RunPipeline, Some(api_key)) => api_key,
        (Effect::Warn(message), _) => {
            return Err(eyre!(
                "{} (pass --api-key or set OPENAI_API_KEY)",
                Error::MissingApiKey(message.to_string())
            ))
        }
        _ => return Err(eyre!(Error::Busy)),
    };

    if config.verbose {
        eprintln!("Model: {}", config.model);
        eprintln!("Completion endpoint: {}", config.chat_completions_url());
        if request.output_language.needs_translation() {
            eprintln!("Translation endpoint: {}", config.translate_url);
        }
        eprintln!();
    }

    let services = LiveServices::new(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Generating your recipes...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = pipeline::run(&services, api_key, &request).await;
    spinner.finish_and_clear();
    session.dispatch(Action::Finished);

    let generated = result.map_err(|e| eyre!(Error::Generation(e.to_string())))?;

    let saved = match (&app.output, &generated.document) {
        (Some(path), Ok(bytes)) => {
            std::fs::write(path, bytes)
                .with_context(|| f!("Failed to write {}", path.display()))?;
            Some(path.as_path())
        }
        _ => None,
    };

    if app.json {
        let output = GenerateOutput::new(&generated, saved);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", "Here are your recipes:".green().bold());
        println!();
        println!("{}", generated.text());
        if let Some(path) = saved {
            eprintln!();
            eprintln!("{} {}", "Saved".green(), path.display());
        }
    }

    match (app.output, generated.export_error()) {
        (Some(_), Some(err)) => Err(eyre!(err)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use crate::pipeline::fakes::FakeServices;
    use crate::translate::FakeBackend;
    use clap::Parser;
    use recipegen_core::request::{Language, RecipeRequest};

    #[test]
    fn test_api_key_flag_is_redacted_in_debug() {
        let app = App::try_parse_from(["generate", "--api-key", "sk-abc123", "-i", "rice"]).unwrap();
        assert_eq!(app.api_key.as_ref().map(ApiKey::expose), Some("sk-abc123"));
        assert!(!format!("{app:?}").contains("sk-abc123"));
    }

    #[test]
    fn test_blank_api_key_flag_is_rejected() {
        assert!(App::try_parse_from(["generate", "--api-key", "  "]).is_err());
    }

    #[tokio::test]
    async fn test_json_summary_with_export_error() {
        let services = FakeServices::new(
            FakeProvider::with_response("Recipe"),
            FakeBackend::with_translation("दाल"),
        );
        let request = RecipeRequest {
            output_language: Language::Hindi,
            ..RecipeRequest::default()
        };
        let generated = pipeline::run(&services, ApiKey::new("sk").unwrap(), &request)
            .await
            .unwrap();

        let json = serde_json::to_value(GenerateOutput::new(&generated, None)).unwrap();
        assert_eq!(json["language"], "hi");
        assert_eq!(json["translated"], true);
        assert_eq!(json["text"], "दाल");
        assert!(json.get("pdf").is_none());
        assert!(json["export_error"]["Export"]
            .as_str()
            .unwrap()
            .contains("U+0926"));
    }

    #[tokio::test]
    async fn test_json_summary_with_saved_pdf() {
        let services = FakeServices::replying("Recipe 1");
        let generated = pipeline::run(
            &services,
            ApiKey::new("sk").unwrap(),
            &RecipeRequest::default(),
        )
        .await
        .unwrap();

        let json = serde_json::to_value(GenerateOutput::new(
            &generated,
            Some(Path::new("out/ai_recipes.pdf")),
        ))
        .unwrap();
        assert_eq!(json["language"], "en");
        assert_eq!(json["translated"], false);
        assert_eq!(json["pdf"], "out/ai_recipes.pdf");
        assert_eq!(json["prompt"], generated.prompt.as_str());
        assert!(json.get("export_error").is_none());
    }
}
