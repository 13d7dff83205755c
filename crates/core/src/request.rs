//! Recipe request model
//!
//! Everything the form collects, validated into types that cannot hold an
//! out-of-range value. Servings is bounded by construction; cuisine, diet and
//! language are closed enums over the labels the form offers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a form submission cannot become a [`RecipeRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("Number of servings must be between {min} and {max}, got {0}", min = Servings::MIN, max = Servings::MAX)]
    ServingsOutOfRange(i64),

    #[error("Number of servings is not a number: {0:?}")]
    ServingsNotANumber(String),

    #[error("Unknown cuisine: {0}")]
    UnknownCuisine(String),

    #[error("Unknown dietary preference: {0}")]
    UnknownDiet(String),

    #[error("Unsupported output language: {0}")]
    UnknownLanguage(String),
}

/// Number of servings, always within `[Servings::MIN, Servings::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Servings(u8);

impl Servings {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;
    pub const DEFAULT: Self = Servings(2);

    pub fn new(value: i64) -> Result<Self, InvalidRequest> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Servings(value as u8))
        } else {
            Err(InvalidRequest::ServingsOutOfRange(value))
        }
    }

    /// Parse a raw form value such as `"4"`.
    pub fn parse(raw: &str) -> Result<Self, InvalidRequest> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidRequest::ServingsNotANumber(raw.to_string()))?;
        Self::new(value)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Servings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Servings {
    type Error = InvalidRequest;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Servings::new(value)
    }
}

impl From<Servings> for u8 {
    fn from(servings: Servings) -> Self {
        servings.0
    }
}

impl FromStr for Servings {
    type Err = InvalidRequest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Servings::parse(s)
    }
}

impl fmt::Display for Servings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compare a user-supplied name against a label, ignoring case, spaces,
/// dashes and underscores ("non vegetarian" matches "Non-Vegetarian").
fn same_label(input: &str, label: &str) -> bool {
    let squash = |s: &str| {
        s.chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect::<String>()
    };
    squash(input) == squash(label)
}

/// Cuisines offered by the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    Indian,
    Italian,
    Chinese,
    Mexican,
    American,
    Thai,
    Japanese,
    Mediterranean,
    French,
    Other,
}

impl Cuisine {
    pub const ALL: [Cuisine; 10] = [
        Cuisine::Indian,
        Cuisine::Italian,
        Cuisine::Chinese,
        Cuisine::Mexican,
        Cuisine::American,
        Cuisine::Thai,
        Cuisine::Japanese,
        Cuisine::Mediterranean,
        Cuisine::French,
        Cuisine::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::Indian => "Indian",
            Cuisine::Italian => "Italian",
            Cuisine::Chinese => "Chinese",
            Cuisine::Mexican => "Mexican",
            Cuisine::American => "American",
            Cuisine::Thai => "Thai",
            Cuisine::Japanese => "Japanese",
            Cuisine::Mediterranean => "Mediterranean",
            Cuisine::French => "French",
            Cuisine::Other => "Other",
        }
    }
}

impl FromStr for Cuisine {
    type Err = InvalidRequest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cuisine::ALL
            .into_iter()
            .find(|c| same_label(s, c.label()))
            .ok_or_else(|| InvalidRequest::UnknownCuisine(s.to_string()))
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dietary preference. Everything except [`Diet::NoPreference`] adds a strict
/// dietary clause to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Diet {
    #[default]
    NoPreference,
    Vegetarian,
    Vegan,
    Jain,
    NonVegetarian,
}

impl Diet {
    pub const ALL: [Diet; 5] = [
        Diet::NoPreference,
        Diet::Vegetarian,
        Diet::Vegan,
        Diet::Jain,
        Diet::NonVegetarian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Diet::NoPreference => "No preference",
            Diet::Vegetarian => "Vegetarian",
            Diet::Vegan => "Vegan",
            Diet::Jain => "Jain",
            Diet::NonVegetarian => "Non-Vegetarian",
        }
    }
}

impl FromStr for Diet {
    type Err = InvalidRequest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Diet::ALL
            .into_iter()
            .find(|d| same_label(s, d.label()))
            .ok_or_else(|| InvalidRequest::UnknownDiet(s.to_string()))
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output language for the rendered recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    French,
    German,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::French,
        Language::German,
        Language::Spanish,
    ];

    /// ISO 639-1 code sent to the translation service.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::French => "fr",
            Language::German => "de",
            Language::Spanish => "es",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
        }
    }

    /// Whether text in this language needs a translation call.
    pub fn needs_translation(&self) -> bool {
        *self != Language::English
    }
}

impl FromStr for Language {
    type Err = InvalidRequest;

    /// Accepts either the code (`"fr"`) or the label (`"French"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(trimmed) || same_label(trimmed, l.label()))
            .ok_or_else(|| InvalidRequest::UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Everything a single "Generate Recipes" action needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// Free text as typed by the user, e.g. `"tomato, paneer, rice"`.
    pub ingredients: String,
    pub servings: Servings,
    /// Selected cuisines in the order they were chosen.
    pub cuisines: Vec<Cuisine>,
    /// Free text, e.g. `"peanuts, shellfish"`.
    pub allergies: String,
    pub diet: Diet,
    pub output_language: Language,
}

impl RecipeRequest {
    pub fn has_ingredients(&self) -> bool {
        !self.ingredients.trim().is_empty()
    }

    pub fn has_allergies(&self) -> bool {
        !self.allergies.trim().is_empty()
    }
}

/// Parse a list of cuisine names, keeping the given order and dropping
/// repeated selections.
pub fn parse_cuisines<I, S>(names: I) -> Result<Vec<Cuisine>, InvalidRequest>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cuisines = Vec::new();
    for name in names {
        let name = name.as_ref();
        if name.trim().is_empty() {
            continue;
        }
        let cuisine = name.parse::<Cuisine>()?;
        if !cuisines.contains(&cuisine) {
            cuisines.push(cuisine);
        }
    }
    Ok(cuisines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servings_bounds() {
        assert_eq!(Servings::new(1).unwrap().get(), 1);
        assert_eq!(Servings::new(12).unwrap().get(), 12);
        assert_eq!(
            Servings::new(0).unwrap_err(),
            InvalidRequest::ServingsOutOfRange(0)
        );
        assert_eq!(
            Servings::new(13).unwrap_err(),
            InvalidRequest::ServingsOutOfRange(13)
        );
    }

    #[test]
    fn test_servings_parse() {
        assert_eq!(Servings::parse(" 4 ").unwrap().get(), 4);
        assert!(matches!(
            Servings::parse("four"),
            Err(InvalidRequest::ServingsNotANumber(_))
        ));
        assert!(matches!(
            Servings::parse("-3"),
            Err(InvalidRequest::ServingsOutOfRange(-3))
        ));
    }

    #[test]
    fn test_servings_default_is_two() {
        assert_eq!(Servings::default().get(), 2);
    }

    #[test]
    fn test_servings_error_message() {
        let err = Servings::new(40).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Number of servings must be between 1 and 12, got 40"
        );
    }

    #[test]
    fn test_servings_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Servings>("5").is_ok());
        assert!(serde_json::from_str::<Servings>("0").is_err());
        assert!(serde_json::from_str::<Servings>("99").is_err());
    }

    #[test]
    fn test_cuisine_from_str() {
        assert_eq!("Thai".parse::<Cuisine>().unwrap(), Cuisine::Thai);
        assert_eq!(
            "mediterranean".parse::<Cuisine>().unwrap(),
            Cuisine::Mediterranean
        );
        assert_eq!(
            "Klingon".parse::<Cuisine>().unwrap_err(),
            InvalidRequest::UnknownCuisine("Klingon".to_string())
        );
    }

    #[test]
    fn test_cuisine_list_has_other_last() {
        assert_eq!(Cuisine::ALL.len(), 10);
        assert_eq!(Cuisine::ALL[9], Cuisine::Other);
    }

    #[test]
    fn test_diet_from_str_variants() {
        assert_eq!("Non-Vegetarian".parse::<Diet>().unwrap(), Diet::NonVegetarian);
        assert_eq!("non vegetarian".parse::<Diet>().unwrap(), Diet::NonVegetarian);
        assert_eq!("no-preference".parse::<Diet>().unwrap(), Diet::NoPreference);
        assert_eq!("JAIN".parse::<Diet>().unwrap(), Diet::Jain);
        assert!("keto".parse::<Diet>().is_err());
    }

    #[test]
    fn test_language_from_code_or_label() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("German".parse::<Language>().unwrap(), Language::German);
        assert_eq!("ES".parse::<Language>().unwrap(), Language::Spanish);
        assert_eq!(
            "pt".parse::<Language>().unwrap_err(),
            InvalidRequest::UnknownLanguage("pt".to_string())
        );
    }

    #[test]
    fn test_language_needs_translation() {
        assert!(!Language::English.needs_translation());
        assert!(Language::French.needs_translation());
    }

    #[test]
    fn test_ingredients_are_present() {
        let request = RecipeRequest {
            ingredients: " tomato, paneer ,, rice ".to_string(),
            ..Default::default()
        };
        assert!(request.has_ingredients());
        assert!(!request.has_allergies());
    }

    #[test]
    fn test_whitespace_only_fields_are_empty() {
        let request = RecipeRequest {
            ingredients: "   \n".to_string(),
            allergies: "\t".to_string(),
            ..Default::default()
        };
        assert!(!request.has_ingredients());
        assert!(!request.has_allergies());
    }

    #[test]
    fn test_parse_cuisines_keeps_order_and_dedups() {
        let cuisines = parse_cuisines(["Thai", "Indian", "thai", ""]).unwrap();
        assert_eq!(cuisines, vec![Cuisine::Thai, Cuisine::Indian]);
    }

    #[test]
    fn test_parse_cuisines_rejects_unknown() {
        assert!(parse_cuisines(["Thai", "Martian"]).is_err());
    }
}
