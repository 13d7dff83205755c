use recipegen_core::request::{Cuisine, Diet, Language, RecipeRequest, Servings};

/// Form fields as command line flags, shared by `generate` and `prompt`.
#[derive(Debug, Clone, clap::Args)]
pub struct RequestArgs {
    /// Ingredients you have, comma-separated (e.g. "tomato, paneer, rice")
    #[arg(short, long, default_value = "")]
    pub ingredients: String,

    /// Number of servings (1-12)
    #[arg(short, long, default_value = "2")]
    pub servings: Servings,

    /// Preferred cuisine; repeat the flag to pick several
    #[arg(short, long = "cuisine")]
    pub cuisines: Vec<Cuisine>,

    /// Allergies or ingredients to avoid, comma-separated
    #[arg(short, long, default_value = "")]
    pub allergies: String,

    /// Dietary preference (No preference, Vegetarian, Vegan, Jain, Non-Vegetarian)
    #[arg(short, long, default_value = "No preference")]
    pub diet: Diet,

    /// Output language (en, hi, fr, de, es)
    #[arg(short, long = "lang", default_value = "en")]
    pub language: Language,
}

impl RequestArgs {
    pub fn to_request(&self) -> RecipeRequest {
        let mut cuisines: Vec<Cuisine> = Vec::with_capacity(self.cuisines.len());
        for cuisine in &self.cuisines {
            if !cuisines.contains(cuisine) {
                cuisines.push(*cuisine);
            }
        }

        RecipeRequest {
            ingredients: self.ingredients.clone(),
            servings: self.servings,
            cuisines,
            allergies: self.allergies.clone(),
            diet: self.diet,
            output_language: self.language,
        }
    }
}
