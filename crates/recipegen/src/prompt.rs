use crate::prelude::{println, *};
use colored::Colorize;
use recipegen_core::prompt;
use recipegen_core::request::RecipeRequest;
use serde::Serialize;

use crate::args::RequestArgs;

#[derive(Debug, clap::Parser)]
#[command(name = "prompt")]
#[command(about = "Print the prompt a request would send, without calling any service")]
pub struct App {
    #[clap(flatten)]
    request: RequestArgs,

    /// Show which clause produced each part of the prompt
    #[arg(long)]
    explain: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct PromptOutput {
    pub request: RecipeRequest,
    pub prompt: String,
    pub clauses: Vec<ClauseOutput>,
}

#[derive(Debug, Serialize)]
pub struct ClauseOutput {
    pub name: &'static str,
    pub text: String,
}

impl PromptOutput {
    pub fn new(request: RecipeRequest) -> Self {
        let clauses = prompt::explain(&request)
            .into_iter()
            .map(|(name, text)| ClauseOutput { name, text })
            .collect();

        Self {
            prompt: prompt::compose(&request),
            clauses,
            request,
        }
    }
}

pub async fn run(app: App, _global: crate::Global) -> Result<()> {
    let output = PromptOutput::new(app.request.to_request());

    if app.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if app.explain {
        let mut table = new_table();
        table.add_row(prettytable::row![
            "Clause".bold().cyan(),
            "Text".bold().cyan()
        ]);
        table.add_row(prettytable::row!["stem", prompt::STEM.trim_end()]);
        for clause in &output.clauses {
            table.add_row(prettytable::row![clause.name, clause.text.trim_end()]);
        }
        table.printstd();
        println!();
    }

    println!("{}", output.prompt);

    Ok(())
}
