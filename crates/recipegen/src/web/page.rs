//! HTML for the recipe form and its outcome.

use std::fmt::Write;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use pulldown_cmark::{html::push_html, Event, Options, Parser};
use recipegen_core::request::{Cuisine, Diet, Language, Servings};
use recipegen_core::session::FormState;

use crate::error::Error;
use crate::pipeline::Generated;

/// What to show under the form.
#[derive(Debug)]
pub enum Outcome {
    Empty,
    Failed(Error),
    Generated(Generated),
}

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #262730; }
form { display: flex; min-height: 100vh; }
aside { width: 18rem; padding: 2rem 1.5rem; background: #f0f2f6; }
main { flex: 1; max-width: 46rem; padding: 2rem 3rem; }
label { display: block; margin: 0 0 1rem; font-size: .9rem; }
input, select, textarea { display: block; width: 100%; box-sizing: border-box; margin-top: .3rem; padding: .4rem; font: inherit; }
textarea { min-height: 5rem; }
.columns { display: flex; gap: 1.5rem; }
.columns label { flex: 1; }
.actions button { margin-right: .5rem; padding: .4rem 1rem; font: inherit; cursor: pointer; }
.spinner { display: none; color: #555; }
form.busy .spinner { display: block; }
form.busy button { pointer-events: none; opacity: .5; }
.notice { padding: .8rem 1rem; border-radius: .4rem; margin: 1rem 0; }
.warning { background: #fffce7; }
.error { background: #ffecec; }
.success { background: #e8f9ee; }
.recipes { line-height: 1.5; }
footer { margin-top: 3rem; font-size: .8rem; color: #777; }
"#;

const SCRIPT: &str = r#"
document.querySelector('form').addEventListener('submit', function (e) {
  if (e.submitter && e.submitter.value === 'generate') { e.target.classList.add('busy'); }
});
"#;

/// Render the whole page. The API key field is always empty.
pub fn render(form: &FormState, outcome: &Outcome) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>AI Recipe Generator</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<form method=\"post\" action=\"/\">\n");

    render_sidebar(&mut html, form);

    html.push_str("<main>\n");
    html.push_str("<h1>🍲 AI Recipe Generator: Recipes from Your Ingredients</h1>\n");
    html.push_str(
        "<p>Enter what you have, set preferences, and get delicious, customized recipes!</p>\n",
    );
    render_fields(&mut html, form);
    html.push_str(
        "<div class=\"actions\">\
         <button type=\"submit\" name=\"action\" value=\"surprise\">Surprise me!</button>\
         <button type=\"submit\" name=\"action\" value=\"generate\">Generate Recipes</button>\
         </div>\n",
    );
    html.push_str("<p class=\"spinner\">Generating your recipes...</p>\n");

    render_outcome(&mut html, outcome);

    html.push_str(
        "<footer>Built with OpenAI GPT, LibreTranslate, and axum. \
         Your API key and data are never stored.</footer>\n",
    );
    html.push_str("</main>\n</form>\n<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    html
}

fn render_sidebar(html: &mut String, form: &FormState) {
    let selected = form.language.parse::<Language>().ok();

    html.push_str("<aside>\n");
    html.push_str(
        "<label>Paste your OpenAI API key here\
         <input type=\"password\" name=\"api_key\" value=\"\" autocomplete=\"off\"></label>\n",
    );
    html.push_str("<p><small>Your API key is used only for this request and not stored.</small></p>\n");
    html.push_str("<label>Output recipe language<select name=\"language\">");
    for language in Language::ALL {
        option(html, language.code(), language.label(), selected == Some(language));
    }
    html.push_str("</select></label>\n</aside>\n");
}

fn render_fields(html: &mut String, form: &FormState) {
    let chosen: Vec<Cuisine> = form
        .cuisines
        .iter()
        .filter_map(|c| c.parse().ok())
        .collect();
    let diet = form.diet.parse::<Diet>().ok();

    html.push_str("<div class=\"columns\">\n");
    let _ = write!(
        html,
        "<label>Number of servings<input type=\"number\" name=\"servings\" min=\"{}\" max=\"{}\" value=\"{}\"></label>\n",
        Servings::MIN,
        Servings::MAX,
        attr(&form.servings)
    );
    html.push_str("<label>Preferred cuisine(s)<select name=\"cuisine\" multiple size=\"5\">");
    for cuisine in Cuisine::ALL {
        option(html, cuisine.label(), cuisine.label(), chosen.contains(&cuisine));
    }
    html.push_str("</select></label>\n</div>\n");

    let _ = write!(
        html,
        "<label>Available ingredients (comma-separated, e.g. tomato, paneer, chicken, rice)\
         <textarea name=\"ingredients\">{}</textarea></label>\n",
        text(&form.ingredients)
    );
    let _ = write!(
        html,
        "<label>Allergies to avoid (comma-separated, optional)\
         <input type=\"text\" name=\"allergies\" value=\"{}\"></label>\n",
        attr(&form.allergies)
    );

    html.push_str("<label>Dietary preference<select name=\"diet\">");
    for d in Diet::ALL {
        option(html, d.label(), d.label(), diet == Some(d));
    }
    html.push_str("</select></label>\n");
}

fn option(html: &mut String, value: &str, label: &str, selected: bool) {
    let _ = write!(
        html,
        "<option value=\"{}\"{}>{}</option>",
        attr(value),
        if selected { " selected" } else { "" },
        text(label)
    );
}

fn render_outcome(html: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Empty => {}
        Outcome::Failed(err) => {
            let class = match err {
                Error::Generation(_) | Error::Export(_) => "error",
                Error::MissingApiKey(_) | Error::InvalidInput(_) | Error::Busy => "warning",
            };
            notice(html, class, &err.to_string());
        }
        Outcome::Generated(generated) => {
            notice(html, "success", "Here are your recipes:");
            let _ = writeln!(
                html,
                "<article class=\"recipes\" lang=\"{}\">\n{}</article>",
                generated.language.code(),
                markdown(generated.text())
            );

            match &generated.document {
                Ok(bytes) => {
                    let _ = writeln!(
                        html,
                        "<p><a class=\"download\" download=\"{}\" href=\"data:{};base64,{}\">📄 Download Recipes as PDF</a></p>",
                        pdf::DOWNLOAD_FILE_NAME,
                        pdf::MIME_TYPE,
                        STANDARD.encode(bytes)
                    );
                }
                Err(_) => {
                    if let Some(err) = generated.export_error() {
                        notice(html, "error", &err.to_string());
                    }
                }
            }
        }
    }
}

/// Markdown to HTML. Raw HTML in the source is shown as text.
fn markdown(source: &str) -> String {
    let events = Parser::new_ext(source, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    push_html(&mut out, events);
    out
}

fn notice(html: &mut String, class: &str, message: &str) {
    let _ = writeln!(
        html,
        "<div class=\"notice {}\" role=\"status\">{}</div>",
        class,
        text(message)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_selected() {
        let html = render(&FormState::default(), &Outcome::Empty);
        assert!(html.contains("<option value=\"en\" selected>English</option>"));
        assert!(html.contains(
            "<option value=\"No preference\" selected>No preference</option>"
        ));
        assert!(html.contains("value=\"2\""));
        assert!(!html.contains("class=\"notice"));
    }

    #[test]
    fn test_all_cuisines_offered() {
        let html = render(&FormState::default(), &Outcome::Empty);
        for cuisine in Cuisine::ALL {
            assert!(html.contains(&format!("<option value=\"{0}\">{0}</option>", cuisine.label())));
        }
    }

    #[test]
    fn test_user_text_is_escaped() {
        let form = FormState {
            ingredients: "</textarea><script>x()</script>".to_string(),
            allergies: "\"nuts\"".to_string(),
            ..FormState::default()
        };
        let html = render(&form, &Outcome::Empty);
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;x()&lt;/script&gt;"));
        assert!(html.contains("value=\"&quot;nuts&quot;\""));
    }

    #[test]
    fn test_markdown_lists_and_headings() {
        let html = markdown("### Recipe 1: Dal\n\n1. Rinse the lentils\n2. Simmer\n\n- *salt*\n");
        assert!(html.contains("<h3>Recipe 1: Dal</h3>"));
        assert!(html.contains("<ol>\n<li>Rinse the lentils</li>\n<li>Simmer</li>\n</ol>"));
        assert!(html.contains("<li><em>salt</em></li>"));
    }

    #[test]
    fn test_markdown_inline_html_is_text() {
        let html = markdown("Serve with <b onclick=\"x()\">rice</b> & naan");
        assert!(html.starts_with("<p>Serve with &lt;b onclick="));
        assert!(html.contains("&gt;rice&lt;/b&gt; &amp; naan</p>"));
        assert!(!html.contains("<b"));
    }

    #[test]
    fn test_generation_error_class() {
        let html = render(
            &FormState::default(),
            &Outcome::Failed(Error::Generation("boom".into())),
        );
        assert!(html.contains(
            "<div class=\"notice error\" role=\"status\">Error generating recipes: boom</div>"
        ));
    }
}
