//! Form session state machine
//!
//! One session is one user working the form. It is `Idle` until a
//! "Generate Recipes" action with an API key moves it to `Generating`; the
//! shell runs the pipeline and reports `Finished` to return to `Idle`.
//! "Surprise me!" only clears the ingredients field and never leaves `Idle`.

use serde::{Deserialize, Serialize};

use crate::request::{parse_cuisines, Diet, InvalidRequest, Language, RecipeRequest, Servings};

/// Warning shown when "Generate Recipes" is pressed without an API key.
pub const MISSING_KEY_WARNING: &str = "Please enter your OpenAI API key in the sidebar!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SessionState {
    #[default]
    Idle,
    Generating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// "Generate Recipes" pressed.
    Generate { has_api_key: bool },
    /// "Surprise me!" pressed.
    SurpriseMe,
    /// The pipeline returned, successfully or not.
    Finished,
}

/// What the shell must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    /// Show a warning; no service call.
    Warn(&'static str),
    /// Compose, generate, translate, export.
    RunPipeline,
    /// Empty the ingredients field.
    ClearIngredients,
    /// Rejected: a pipeline is already running for this session.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: SessionState,
    pub effect: Effect,
}

/// The transition table.
pub fn transition(state: SessionState, action: &Action) -> Transition {
    use SessionState::*;

    match (state, action) {
        (Idle, Action::Generate { has_api_key: false }) => Transition {
            next: Idle,
            effect: Effect::Warn(MISSING_KEY_WARNING),
        },
        (Idle, Action::Generate { has_api_key: true }) => Transition {
            next: Generating,
            effect: Effect::RunPipeline,
        },
        (Idle, Action::SurpriseMe) => Transition {
            next: Idle,
            effect: Effect::ClearIngredients,
        },
        (Idle, Action::Finished) => Transition {
            next: Idle,
            effect: Effect::Nothing,
        },
        (Generating, Action::Finished) => Transition {
            next: Idle,
            effect: Effect::Nothing,
        },
        (Generating, _) => Transition {
            next: Generating,
            effect: Effect::Busy,
        },
    }
}

/// A session holding only its current state.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Apply an action and return the effect the shell must carry out.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        let Transition { next, effect } = transition(self.state, &action);
        self.state = next;
        effect
    }
}

/// Raw form values as submitted, before validation.
///
/// The API key is deliberately not part of this struct: it is read per
/// request by the shell and never rendered back into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub ingredients: String,
    pub servings: String,
    pub cuisines: Vec<String>,
    pub allergies: String,
    pub diet: String,
    pub language: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            ingredients: String::new(),
            servings: Servings::DEFAULT.to_string(),
            cuisines: Vec::new(),
            allergies: String::new(),
            diet: Diet::default().label().to_string(),
            language: Language::default().code().to_string(),
        }
    }
}

impl FormState {
    /// Validate the raw values into a request.
    pub fn to_request(&self) -> Result<RecipeRequest, InvalidRequest> {
        Ok(RecipeRequest {
            ingredients: self.ingredients.clone(),
            servings: Servings::parse(&self.servings)?,
            cuisines: parse_cuisines(&self.cuisines)?,
            allergies: self.allergies.clone(),
            diet: self.diet.parse()?,
            output_language: self.language.parse()?,
        })
    }
}

/// The "Surprise me!" mutation: forget the ingredients, keep everything else.
pub fn apply_surprise(form: &mut FormState) {
    form.ingredients.clear();
}
