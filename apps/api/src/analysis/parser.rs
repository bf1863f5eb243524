//! Turns raw model output into an `AnalysisResult`.

use serde_json::Value;

use crate::analysis::models::AnalysisResult;
use crate::errors::AppError;

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        strip_closing_fence(stripped)
    } else if let Some(stripped) = text.strip_prefix("```") {
        strip_closing_fence(stripped)
    } else {
        text
    }
}

fn strip_closing_fence(text: &str) -> &str {
    let text = text.trim();
    text.strip_suffix("```").map(str::trim).unwrap_or(text)
}

/// Parses the model reply. Malformed output comes back as `AppError::ResponseParse`.
/// The only field checked is `score`; everything else is kept verbatim.
pub fn parse_model_output(raw: &str) -> Result<AnalysisResult, AppError> {
    let cleaned = strip_json_fences(raw);

    let value: Value =
        serde_json::from_str(cleaned).map_err(|e| AppError::ResponseParse(e.to_string()))?;
    match value {
        Value::Object(fields) => AnalysisResult::from_map(fields).map_err(AppError::ResponseParse),
        other => Err(AppError::ResponseParse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
