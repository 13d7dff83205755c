//! Prompt composition
//!
//! The instruction sent to the model is a fixed stem followed by a list of
//! clauses. Each clause builder looks at the request and either contributes a
//! fragment or stays silent. The list order is part of the contract: the model
//! is sensitive to instruction order, so clauses are concatenated exactly as
//! declared in [`CLAUSES`].

use crate::request::{Cuisine, Diet, RecipeRequest};

/// Opening sentence of every prompt.
pub const STEM: &str = "You are a creative expert chef. Suggest 2 unique recipes ";

/// Closing instruction describing the four-part structure of each recipe.
pub const CLOSING: &str = "For each recipe, list: 1) recipe name, 2) ingredients used, \
3) step-by-step instructions, and 4) approximate prep time. \
If some ingredients can't be used in any recipe, that's fine.";

/// A named clause builder. Returns `None` when the clause does not apply.
pub struct Clause {
    pub name: &'static str,
    pub build: fn(&RecipeRequest) -> Option<String>,
}

/// All clauses, in the order they are appended after [`STEM`].
pub const CLAUSES: &[Clause] = &[
    Clause {
        name: "ingredients",
        build: ingredients_clause,
    },
    Clause {
        name: "servings",
        build: servings_clause,
    },
    Clause {
        name: "cuisine",
        build: cuisine_clause_for,
    },
    Clause {
        name: "allergens",
        build: allergens_clause,
    },
    Clause {
        name: "diet",
        build: diet_clause,
    },
    Clause {
        name: "closing",
        build: closing_clause,
    },
];

/// Build the full instruction string for a request.
pub fn compose(request: &RecipeRequest) -> String {
    let mut prompt = String::from(STEM);
    for clause in CLAUSES {
        if let Some(fragment) = (clause.build)(request) {
            prompt.push_str(&fragment);
        }
    }
    prompt
}

/// The clauses that fire for a request, by name, in prompt order.
///
/// Used by `recipegen prompt --explain` to show how a prompt was assembled.
pub fn explain(request: &RecipeRequest) -> Vec<(&'static str, String)> {
    CLAUSES
        .iter()
        .filter_map(|clause| (clause.build)(request).map(|fragment| (clause.name, fragment)))
        .collect()
}

/// Ingredients the user has, or permission to use common staples.
///
/// The text is inserted as typed; only the emptiness check trims it.
pub fn ingredients_clause(request: &RecipeRequest) -> Option<String> {
    if request.has_ingredients() {
        Some(format!(
            "using the following ingredients: {}. ",
            request.ingredients
        ))
    } else {
        Some("with any common kitchen ingredients. ".to_string())
    }
}

pub fn servings_clause(request: &RecipeRequest) -> Option<String> {
    Some(format!(
        "The recipes should be for {} serving(s). ",
        request.servings
    ))
}

fn cuisine_clause_for(request: &RecipeRequest) -> Option<String> {
    Some(cuisine_clause(&request.cuisines)).filter(|clause| !clause.is_empty())
}

/// Cuisine phrasing: nothing for no selection, singular for one, a
/// comma-joined list otherwise.
pub fn cuisine_clause(cuisines: &[Cuisine]) -> String {
    match cuisines {
        [] => String::new(),
        [only] => format!("The recipe(s) should follow the {} cuisine. ", only),
        many => {
            let names: Vec<&str> = many.iter().map(Cuisine::label).collect();
            format!(
                "The recipe(s) should be inspired by these cuisines: {}. ",
                names.join(", ")
            )
        }
    }
}

pub fn allergens_clause(request: &RecipeRequest) -> Option<String> {
    request
        .has_allergies()
        .then(|| format!("Avoid these allergens: {}. ", request.allergies))
}

pub fn diet_clause(request: &RecipeRequest) -> Option<String> {
    (request.diet != Diet::NoPreference).then(|| {
        format!(
            "All recipes must strictly follow the '{}' dietary rules. ",
            request.diet
        )
    })
}

fn closing_clause(_request: &RecipeRequest) -> Option<String> {
    Some(CLOSING.to_string())
}
