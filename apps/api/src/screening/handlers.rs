//! Axum route handler for the screening API.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::candidate::ResumeFile;
use crate::models::score::{EmailBatch, RankedCandidate};
use crate::screening::{run_pipeline, PipelineError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub ranked: Vec<RankedCandidate>,
    pub emails: EmailBatch,
}

/// POST /api/v1/screen
///
/// Multipart form: `job_description` (text), `top_x` (integer text field,
/// default 3), and one or more `resumes` file parts. Runs the full pipeline
/// and returns the ranked candidates with drafted emails.
pub async fn handle_screen(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreenResponse>, AppError> {
    let mut job_description = String::new();
    let mut top_x: usize = 3;
    let mut files: Vec<ResumeFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid job_description: {e}")))?;
            }
            "top_x" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("invalid top_x: {e}")))?;
                top_x = raw
                    .trim()
                    .parse()
                    .map_err(|_| AppError::Validation("top_x must be a positive integer".into()))?;
            }
            "resumes" => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let content_type = field.content_type().unwrap_or("application/pdf").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read {filename}: {e}")))?;
                files.push(ResumeFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            other => {
                return Err(AppError::Validation(format!(
                    "unexpected multipart field `{other}`"
                )))
            }
        }
    }

    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    if files.is_empty() {
        return Err(AppError::Validation(
            "upload at least one resume".to_string(),
        ));
    }
    if top_x == 0 {
        return Err(AppError::Validation(
            "top_x must be at least 1".to_string(),
        ));
    }

    let outcome = run_pipeline(
        &state.extractor,
        &job_description,
        files,
        top_x,
        state.config.max_concurrent_llm_calls,
    )
    .await
    .map_err(AppError::from)?;

    Ok(Json(ScreenResponse {
        ranked: outcome.ranked,
        emails: outcome.emails,
    }))
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::JobDescription(crate::screening::ParseError::EmptyInput) => {
                AppError::Validation("job_description cannot be empty".to_string())
            }
            PipelineError::JobDescription(e) => AppError::Llm(e.to_string()),
            PipelineError::AllResumesUnreadable { .. } => {
                AppError::UnprocessableEntity(err.to_string())
            }
            PipelineError::Internal(e) => AppError::Internal(e),
        }
    }
}
