use recipegen_core::session::FormState;

use crate::llm::ApiKey;

/// Which button submitted the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormAction {
    #[default]
    Generate,
    Surprise,
}

/// One decoded form post.
#[derive(Debug, Default)]
pub struct Submission {
    pub action: FormAction,
    pub api_key: Option<ApiKey>,
    pub form: FormState,
}

impl Submission {
    /// Build a submission from raw `name=value` pairs. The cuisine field may
    /// repeat; unknown fields are ignored.
    pub fn from_fields(fields: Vec<(String, String)>) -> Self {
        let mut submission = Submission::default();

        for (name, value) in fields {
            let form = &mut submission.form;
            match name.as_str() {
                "action" => {
                    submission.action = match value.as_str() {
                        "surprise" => FormAction::Surprise,
                        _ => FormAction::Generate,
                    }
                }
                "api_key" => submission.api_key = ApiKey::new(&value),
                "ingredients" => form.ingredients = value,
                "servings" => form.servings = value,
                "cuisine" => form.cuisines.push(value),
                "allergies" => form.allergies = value,
                "diet" => form.diet = value,
                "language" => form.language = value,
                _ => {}
            }
        }

        submission
    }
}
