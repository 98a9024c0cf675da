//! Prompt templates for the vision classification calls.
//!
//! One template per report kind under `templates/prompts/classification/`.
//! The expected response schema is injected at render time so the prompt and
//! the response parser can never disagree about field names.

pub mod engine;

pub use engine::{render_template, TemplateError};

use minijinja::Value;
use std::collections::HashMap;

/// Render the waste classification prompt with the response schema embedded.
pub fn render_waste_prompt(json_schema: &str) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("json_schema", Value::from(json_schema));

    render_template("classification/waste.jinja", &ctx)
}

/// Render the street cleanliness prompt with the response schema embedded.
pub fn render_street_prompt(json_schema: &str) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("json_schema", Value::from(json_schema));

    render_template("classification/street.jinja", &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waste_prompt_lists_the_category_set() {
        let prompt = render_waste_prompt("{\"marker\": true}").unwrap();

        for category in [
            "Plastic",
            "Paper",
            "Metal",
            "Glass",
            "Organic",
            "Electronic",
            "Hazardous",
            "Other",
        ] {
            assert!(prompt.contains(category), "missing category {category}");
        }
        assert!(prompt.contains("{\"marker\": true}"));
        assert!(prompt.contains("ONLY"));
    }

    #[test]
    fn test_street_prompt_describes_the_score_scale() {
        let prompt = render_street_prompt("{\"marker\": true}").unwrap();

        assert!(prompt.contains("cleanliness_score"));
        assert!(prompt.contains("0-100"));
        assert!(prompt.contains("{\"marker\": true}"));
        assert!(prompt.contains("ONLY"));
    }
}
