//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::models::{AnalysisRequest, AnalysisResult, UploadedDocument};
use crate::analysis::{analyze, AnalysisOptions};
use crate::errors::AppError;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// POST /analyze
///
/// Multipart upload with `resume` and `job_description` file parts.
/// Returns the model's skill-overlap report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let analysis_id = Uuid::new_v4();

    async move {
        let request = read_upload(multipart).await?;
        info!(
            "Analyzing resume ({} bytes) against job description ({} bytes)",
            request.resume.bytes.len(),
            request.job_description.bytes.len()
        );

        let result = analyze(
            &request,
            state.model.as_ref(),
            AnalysisOptions::from(&state.config),
        )
        .await?;

        info!("Analysis complete (score: {:?})", result.score());
        Ok::<_, AppError>(Json(result))
    }
    .instrument(info_span!("analyze", %analysis_id))
    .await
}

async fn read_upload(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut resume = None;
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let slot = match name.as_str() {
            RESUME_FIELD => &mut resume,
            JOB_DESCRIPTION_FIELD => &mut job_description,
            other => {
                debug!("Ignoring unexpected multipart field '{other}'");
                continue;
            }
        };

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;

        *slot = Some(UploadedDocument {
            file_name,
            content_type,
            bytes,
        });
    }

    Ok(AnalysisRequest {
        resume: resume.ok_or_else(|| AppError::MissingField(RESUME_FIELD.to_string()))?,
        job_description: job_description
            .ok_or_else(|| AppError::MissingField(JOB_DESCRIPTION_FIELD.to_string()))?,
    })
}
