/// Everything the shell reports back to the person at the form or terminal.
///
/// Export failures are kept apart from generation failures: the recipe text
/// is still shown when only the PDF could not be built.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("{0}")]
    MissingApiKey(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error generating recipes: {0}")]
    Generation(String),

    #[error("Could not create the PDF: {0}")]
    Export(String),

    #[error("A generation is already running, please wait for it to finish")]
    Busy,
}
