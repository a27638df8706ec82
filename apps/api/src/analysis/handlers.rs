//! Axum route handlers for stateless analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::analysis::{fetch_with_timeout, AnalysisRequest, ResumeUpload};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

const RESUME_FIELD: &str = "resumeFile";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

/// Reads the analysis form. An empty file input counts as no resume.
pub async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut request = AnalysisRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                if !bytes.is_empty() {
                    request.resume = Some(ResumeUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                request.job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
            }
            other => debug!("Ignoring unknown form field {other:?}"),
        }
    }

    Ok(request)
}

/// POST /analyze, POST /api/v1/analyze
///
/// Analyzes one uploaded resume against a job description and returns the result as JSON.
/// Does not touch the dashboard session.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let request = read_analysis_form(multipart).await?;
    if request.resume.is_none() {
        return Err(AppError::Validation("No resume file found".to_string()));
    }

    let result = fetch_with_timeout(
        state.analysis_source.as_ref(),
        &request,
        state.config.analysis_timeout,
    )
    .await?;

    Ok(Json(result))
}
