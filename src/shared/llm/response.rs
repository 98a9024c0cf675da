use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Serde default for the success bookkeeping field carried by every model
/// response type (a freshly parsed response counts as successful).
pub fn default_true() -> bool {
    true
}

/// Contract for model response payloads that degrade instead of failing.
///
/// A type implementing this trait can always be produced from model output:
/// when parsing fails, `Default::default()` is taken and marked as a fallback
/// with the parse error attached. Callers inspect `is_success()` to decide
/// whether the payload is real analysis or the unanalyzable placeholder.
pub trait LlmResponse: DeserializeOwned + Default + JsonSchema {
    /// Mark this response as a fallback and record why.
    fn mark_as_fallback(&mut self, error_message: String);

    /// Whether this response came from a successful parse.
    fn is_success(&self) -> bool;

    /// JSON schema of the expected payload, embedded in prompts so the model
    /// and the parser agree on field names.
    fn json_schema_string() -> String {
        let mut gen = SchemaGenerator::default();
        let schema = gen.root_schema_for::<Self>();
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}
