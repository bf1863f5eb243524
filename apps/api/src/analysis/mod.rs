//! Resume / job-description skill analysis.
//!
//! Pipeline: extract text, build prompt, model call, parse, optional fuzzy reconcile.
//! All model calls go through `llm_client::ModelClient`.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;

use std::time::Instant;

use tracing::{info, warn};

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::parser::parse_model_output;
use crate::analysis::prompts::build_prompt;
use crate::config::Config;
use crate::errors::AppError;
use crate::extract::extract_text;
use crate::llm_client::ModelClient;
use crate::matching::reconcile;

/// Per-request knobs derived from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub fuzzy_reconcile: bool,
    pub fuzzy_threshold: u8,
}

impl From<&Config> for AnalysisOptions {
    fn from(config: &Config) -> Self {
        Self {
            fuzzy_reconcile: config.fuzzy_reconcile,
            fuzzy_threshold: config.fuzzy_threshold,
        }
    }
}

/// Runs the full analysis for one request.
///
/// Empty extracted text is not rejected; the model is still called.
pub async fn analyze(
    request: &AnalysisRequest,
    model: &dyn ModelClient,
    options: AnalysisOptions,
) -> Result<AnalysisResult, AppError> {
    let resume_text = extract_text(&request.resume).await?;
    let jd_text = extract_text(&request.job_description).await?;

    if resume_text.trim().is_empty() {
        warn!("Resume text is empty after extraction; calling the model anyway");
    }
    if jd_text.trim().is_empty() {
        warn!("Job description text is empty after extraction; calling the model anyway");
    }

    let prompt = build_prompt(&resume_text, &jd_text);

    let started = Instant::now();
    let raw = model.generate(&prompt).await?;
    info!(
        "Model {} answered in {}ms ({} chars)",
        model.model(),
        started.elapsed().as_millis(),
        raw.len()
    );

    let mut result = parse_model_output(&raw)?;

    if options.fuzzy_reconcile {
        reconcile(&mut result, options.fuzzy_threshold);
    }

    Ok(result)
}
