use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

/// One uploaded file as handed over by the HTTP layer.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: UploadedDocument,
    pub job_description: UploadedDocument,
}

pub const JD_SKILLS: &str = "jd_skills";
pub const MATCHED_SKILLS: &str = "matched_skills";
pub const MISSING_SKILLS: &str = "missing_skills";
pub const RESUME_SKILLS: &str = "resume_skills";
pub const SCORE: &str = "score";

/// Skill-overlap report produced by the model.
///
/// Kept as the model's own JSON object, key order included. Only `score` is
/// normalized; every other field is passed through as the model wrote it, and a
/// field the model leaves out stays absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

impl AnalysisResult {
    /// Wraps a parsed reply, coercing a present, non-null `score` into an integer in 0..=100.
    pub fn from_map(mut fields: Map<String, Value>) -> Result<Self, String> {
        if let Some(raw) = fields.get_mut(SCORE) {
            if !raw.is_null() {
                *raw = Value::from(normalize_score(raw)?);
            }
        }
        Ok(Self(fields))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn score(&self) -> Option<u8> {
        self.0
            .get(SCORE)
            .and_then(Value::as_u64)
            .and_then(|n| u8::try_from(n).ok())
    }

    /// The named list, if it is an array made only of strings.
    pub fn skills(&self, field: &str) -> Option<Vec<String>> {
        self.0
            .get(field)?
            .as_array()?
            .iter()
            .map(|v| v.as_str().map(str::to_owned))
            .collect()
    }

    /// Replaces the named list in place; a new key is appended at the end.
    pub fn set_skills(&mut self, field: &str, skills: Vec<String>) {
        self.0.insert(field.to_string(), Value::from(skills));
    }

    pub fn set_score(&mut self, score: u8) {
        self.0.insert(SCORE.to_string(), Value::from(score.min(100)));
    }
}

/// Accepts integers, floats and numeric strings ("67", "67%"); rounds and clamps to 0..=100.
fn normalize_score(value: &Value) -> Result<u8, String> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n.round().clamp(0.0, 100.0) as u8),
        _ => Err(format!("score must be a number between 0 and 100, got {value}")),
    }
}
