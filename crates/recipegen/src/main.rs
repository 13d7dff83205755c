use crate::prelude::*;
use clap::Parser;

mod args;
mod config;
mod error;
mod export;
mod generate;
mod llm;
mod pipeline;
mod prelude;
mod prompt;
mod translate;
mod web;

#[cfg(test)]
mod test_support;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Turn the ingredients you have into recipe suggestions, optionally translated and saved as PDF"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Chat completion model
    #[clap(
        long,
        env = "RECIPEGEN_MODEL",
        global = true,
        default_value = recipegen_core::completion::DEFAULT_MODEL
    )]
    model: String,

    /// Base URL of the OpenAI-compatible API
    #[clap(
        long,
        env = "OPENAI_BASE_URL",
        global = true,
        default_value = "https://api.openai.com/v1"
    )]
    openai_base_url: String,

    /// LibreTranslate-compatible translation endpoint
    #[clap(
        long,
        env = "RECIPEGEN_TRANSLATE_URL",
        global = true,
        default_value = recipegen_core::translate::DEFAULT_ENDPOINT
    )]
    translate_url: String,

    /// Seconds to wait for the completion service
    #[clap(
        long,
        env = "RECIPEGEN_COMPLETION_TIMEOUT",
        global = true,
        default_value = "120"
    )]
    completion_timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "RECIPEGEN_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the recipe form in the browser
    Serve(crate::web::App),

    /// Generate recipes once from the command line
    Generate(crate::generate::App),

    /// Print the prompt a request would send, without calling any service
    Prompt(crate::prompt::App),

    /// Save a plain-text recipe file as PDF
    Export(crate::export::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(sub_app) => crate::web::run(sub_app, app.global).await,
        SubCommands::Generate(sub_app) => crate::generate::run(sub_app, app.global).await,
        SubCommands::Prompt(sub_app) => crate::prompt::run(sub_app, app.global).await,
        SubCommands::Export(sub_app) => crate::export::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
