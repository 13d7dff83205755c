mod form;
mod page;

use crate::prelude::{eprintln, *};
use axum::{extract::State, response::Html, routing::get, Form, Router};
use recipegen_core::session::{apply_surprise, Action, Effect, FormState, Session};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::Config;
use crate::llm::ApiKey;
use crate::pipeline::{self, LiveServices, Services};
use form::{FormAction, Submission};
use page::Outcome;

/// Largest form post accepted, in bytes.
const MAX_FORM_BYTES: usize = 64 * 1024;

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Serve the recipe form in the browser")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, default_value = "8501")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = Config::from_global(&global);
    let services = LiveServices::new(config.clone())?;

    let addr = format!("{}:{}", app.host, app.port);

    if config.verbose {
        eprintln!("Completion endpoint: {}", config.chat_completions_url());
        eprintln!("Translation endpoint: {}", config.translate_url);
        eprintln!("Model: {}", config.model);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("recipe form listening on http://{}", addr);
    if config.verbose {
        eprintln!("Recipe form listening on http://{}", addr);
    }

    axum::serve(listener, router(Arc::new(services)))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

pub fn router(services: Arc<dyn Services>) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .with_state(services)
}

async fn index() -> Html<String> {
    Html(page::render(&FormState::default(), &Outcome::Empty))
}

async fn submit(
    State(services): State<Arc<dyn Services>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Html<String> {
    let Submission {
        action,
        api_key,
        mut form,
    } = Submission::from_fields(fields);

    let mut session = Session::new();

    let outcome = match action {
        FormAction::Surprise => {
            if session.dispatch(Action::SurpriseMe) == Effect::ClearIngredients {
                apply_surprise(&mut form);
            }
            Outcome::Empty
        }
        FormAction::Generate => generate(services.as_ref(), &mut session, api_key, &form).await,
    };

    Html(page::render(&form, &outcome))
}

async fn generate(
    services: &dyn Services,
    session: &mut Session,
    api_key: Option<ApiKey>,
    form: &FormState,
) -> Outcome {
    let effect = session.dispatch(Action::Generate {
        has_api_key: api_key.is_some(),
    });

    match (effect, api_key) {
        (Effect::Warn(message), _) => Outcome::Failed(Error::MissingApiKey(message.to_string())),
        (Effect::RunPipeline, Some(api_key)) => {
            let outcome = match form.to_request() {
                Err(e) => Outcome::Failed(Error::InvalidInput(e.to_string())),
                Ok(request) => match pipeline::run(services, api_key, &request).await {
                    Ok(generated) => Outcome::Generated(generated),
                    Err(e) => {
                        log::error!("recipe generation failed: {}", e);
                        Outcome::Failed(Error::Generation(e.to_string()))
                    }
                },
            };
            session.dispatch(Action::Finished);
            outcome
        }
        (Effect::Busy, _) => Outcome::Failed(Error::Busy),
        _ => Outcome::Empty,
    }
}
