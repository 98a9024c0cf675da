use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

use super::LlmResponse;

lazy_static! {
    /// Trailing comma immediately before a closing brace or bracket
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// String concatenation operators the model sometimes emits ("a" + "b")
    static ref STRING_CONCAT_RE: Regex = Regex::new(r#""\s*\+\s*""#).unwrap();
}

/// Upper bound on the repair pass; a reply pathological enough to exceed it
/// is treated as unparseable
const JSON_REPAIR_TIMEOUT: Duration = Duration::from_secs(5);

/// Pulls the JSON object out of a model reply.
///
/// Replies arrive in several shapes, tried in order: a ```json fenced block,
/// a generic fenced block (language tag skipped), a bare object, or an object
/// embedded in surrounding prose (first `{` to last `}`). Unterminated fences
/// are tolerated by taking everything after the opening marker.
pub fn extract_json(text: &str) -> Result<String, String> {
    if let Some((_, rest)) = text.split_once("```json") {
        return rest
            .split("```")
            .next()
            .map(|block| block.trim().to_string())
            .ok_or_else(|| "Empty ```json block in model reply".to_string());
    }

    if let Some((_, rest)) = text.split_once("```") {
        // The opening fence may carry a language tag on the same line
        if let Some((_, body)) = rest.split_once('\n') {
            if let Some(block) = body.split("```").next() {
                return Ok(block.trim().to_string());
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    let start = text
        .find('{')
        .ok_or_else(|| "No JSON object found in model reply".to_string())?;
    let end = text
        .rfind('}')
        .ok_or_else(|| "Unterminated JSON object in model reply".to_string())?;

    if start < end {
        Ok(text[start..=end].to_string())
    } else {
        Err("Invalid JSON object boundaries in model reply".to_string())
    }
}

/// Removes trailing commas before `}` / `]`, e.g. `{"a": 1,}` -> `{"a": 1}`
pub fn fix_trailing_commas(json_str: &str) -> String {
    TRAILING_COMMA_RE.replace_all(json_str, "$1").to_string()
}

/// Merges `"a" + "b"` into `"ab"`; concatenation is not valid JSON but shows
/// up in model output regularly
pub fn fix_string_concatenation(json_str: &str) -> String {
    STRING_CONCAT_RE.replace_all(json_str, "").to_string()
}

fn apply_quick_fixes(json_str: &str) -> String {
    let fixed = fix_string_concatenation(json_str);
    fix_trailing_commas(&fixed)
}

/// Last-resort structural repair via llm_json, guarded against panics and
/// runaway inputs.
fn repair_json_guarded(json_str: &str) -> Option<String> {
    let started = std::time::Instant::now();

    let options = llm_json::RepairOptions::default();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        llm_json::repair_json(json_str, &options)
    }));

    if started.elapsed() > JSON_REPAIR_TIMEOUT {
        tracing::warn!("JSON repair exceeded {:?}, discarding", JSON_REPAIR_TIMEOUT);
        return None;
    }

    match result {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("JSON repair failed: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("JSON repair panicked");
            None
        }
    }
}

/// Parsing pipeline: extract, direct parse, quick fixes, structural repair.
/// Each stage only runs when the previous one failed.
fn try_parse<T>(text: &str) -> Result<T, String>
where
    T: LlmResponse,
{
    let json_str = extract_json(text)?;

    tracing::debug!(
        "Extracted JSON (first 500 chars): {}",
        json_str.chars().take(500).collect::<String>()
    );

    if let Ok(parsed) = serde_json::from_str::<T>(&json_str) {
        return Ok(parsed);
    }

    let fixed = apply_quick_fixes(&json_str);
    if let Ok(parsed) = serde_json::from_str::<T>(&fixed) {
        tracing::debug!("Model reply parsed after quick fixes");
        return Ok(parsed);
    }

    if let Some(repaired) = repair_json_guarded(&json_str) {
        if let Ok(parsed) = serde_json::from_str::<T>(&repaired) {
            tracing::debug!("Model reply parsed after structural repair");
            return Ok(parsed);
        }
    }

    Err(format!(
        "Failed to parse model reply after all repair attempts. Reply began: {}",
        json_str.chars().take(200).collect::<String>()
    ))
}

/// Main entry point for turning model output into a typed payload.
///
/// Never fails: when every parse strategy is exhausted the type's default
/// value is returned, marked as a fallback with the parse error attached.
/// The caller checks `is_success()` before treating the payload as analysis.
pub fn parse_with_fallback<T>(text: &str) -> T
where
    T: LlmResponse,
{
    match try_parse::<T>(text) {
        Ok(parsed) => parsed,
        Err(error_msg) => {
            tracing::warn!("Model reply unparseable, using fallback: {}", error_msg);
            let mut fallback = T::default();
            fallback.mark_as_fallback(error_msg);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::llm::response::default_true;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
    struct SceneCheck {
        pub score: i32,
        pub remarks: Vec<String>,
        pub flagged: Option<bool>,

        #[serde(default = "default_true")]
        #[schemars(skip)]
        pub is_llm_success: bool,

        #[serde(skip_serializing_if = "Option::is_none")]
        #[schemars(skip)]
        pub llm_error_message: Option<String>,
    }

    impl LlmResponse for SceneCheck {
        fn mark_as_fallback(&mut self, error_message: String) {
            self.is_llm_success = false;
            self.llm_error_message = Some(error_message);
        }

        fn is_success(&self) -> bool {
            self.is_llm_success
        }
    }

    // ==================== extract_json tests ====================

    #[test]
    fn test_extract_from_labeled_fence() {
        let reply = "Sure, here is the assessment:\n\n```json\n{\"score\": 40, \"remarks\": []}\n```\nLet me know if you need more.";
        let json = extract_json(reply).unwrap();
        assert_eq!(json, r#"{"score": 40, "remarks": []}"#);
    }

    #[test]
    fn test_extract_from_generic_fence_skips_language_tag() {
        let reply = "```javascript\n{\"score\": 10, \"remarks\": [\"a\"]}\n```";
        let json = extract_json(reply).unwrap();
        assert_eq!(json, r#"{"score": 10, "remarks": ["a"]}"#);
    }

    #[test]
    fn test_extract_unterminated_fence_takes_rest() {
        let reply = "```json\n{\"score\": 5, \"remarks\": []}";
        let json = extract_json(reply).unwrap();
        assert_eq!(json, r#"{"score": 5, "remarks": []}"#);
    }

    #[test]
    fn test_extract_bare_object_with_whitespace() {
        let reply = "\n\n  {\"score\": 7, \"remarks\": []}  \n";
        let json = extract_json(reply).unwrap();
        assert_eq!(json, r#"{"score": 7, "remarks": []}"#);
    }

    #[test]
    fn test_extract_embedded_object() {
        let reply = "The result is {\"score\": 3, \"remarks\": []} as requested.";
        let json = extract_json(reply).unwrap();
        assert_eq!(json, r#"{"score": 3, "remarks": []}"#);
    }

    #[test]
    fn test_extract_without_object_fails() {
        assert!(extract_json("no structured data here").is_err());
    }

    // ==================== quick fix tests ====================

    #[test]
    fn test_fix_trailing_commas() {
        assert_eq!(
            fix_trailing_commas(r#"{"score": 1, "remarks": ["x",],}"#),
            r#"{"score": 1, "remarks": ["x"]}"#
        );
    }

    #[test]
    fn test_fix_string_concatenation() {
        assert_eq!(
            fix_string_concatenation(r#"{"remarks": ["curb" + "side"]}"#),
            r#"{"remarks": ["curbside"]}"#
        );
        assert_eq!(
            fix_string_concatenation(r#"{"remarks": ["a"   +   "b" + "c"]}"#),
            r#"{"remarks": ["abc"]}"#
        );
    }

    // ==================== parse_with_fallback tests ====================

    #[test]
    fn test_parse_valid_reply() {
        let reply = r#"{"score": 88, "remarks": ["tidy"], "flagged": false}"#;
        let result: SceneCheck = parse_with_fallback(reply);

        assert!(result.is_success());
        assert_eq!(result.score, 88);
        assert_eq!(result.remarks, vec!["tidy"]);
        assert_eq!(result.flagged, Some(false));
        assert!(result.llm_error_message.is_none());
    }

    #[test]
    fn test_fenced_reply_parses_identically_to_bare() {
        let bare = r#"{"score": 61, "remarks": ["swept"], "flagged": true}"#;
        let fenced = format!("```json\n{bare}\n```");

        let from_bare: SceneCheck = parse_with_fallback(bare);
        let from_fenced: SceneCheck = parse_with_fallback(&fenced);

        assert!(from_bare.is_success() && from_fenced.is_success());
        assert_eq!(from_bare.score, from_fenced.score);
        assert_eq!(from_bare.remarks, from_fenced.remarks);
        assert_eq!(from_bare.flagged, from_fenced.flagged);
    }

    #[test]
    fn test_parse_survives_trailing_comma() {
        let reply = r#"{"score": 12, "remarks": [],}"#;
        let result: SceneCheck = parse_with_fallback(reply);
        assert!(result.is_success());
        assert_eq!(result.score, 12);
    }

    #[test]
    fn test_parse_survives_string_concatenation() {
        let reply = r#"{"score": 9, "remarks": ["side" + "walk"]}"#;
        let result: SceneCheck = parse_with_fallback(reply);
        assert!(result.is_success());
        assert_eq!(result.remarks, vec!["sidewalk"]);
    }

    #[test]
    fn test_unparseable_reply_falls_back() {
        let result: SceneCheck = parse_with_fallback("I could not look at the image, sorry.");

        assert!(!result.is_success());
        assert!(result.llm_error_message.is_some());
        assert_eq!(result.score, 0);
        assert!(result.remarks.is_empty());
    }

    #[test]
    fn test_truncated_reply_never_panics() {
        let reply = r#"{"score": 44, "remarks": ["#;
        let result: SceneCheck = parse_with_fallback(reply);
        // Repair may or may not recover this; either way it must resolve
        assert!(result.is_success() || result.llm_error_message.is_some());
    }

    // ==================== schema tests ====================

    #[test]
    fn test_schema_excludes_bookkeeping_fields() {
        let schema = SceneCheck::json_schema_string();

        assert!(schema.contains("score"));
        assert!(schema.contains("remarks"));
        assert!(!schema.contains("is_llm_success"));
        assert!(!schema.contains("llm_error_message"));
    }
}
