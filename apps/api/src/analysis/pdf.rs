use tracing::debug;

use crate::analysis::ResumeUpload;
use crate::errors::AppError;

/// Extracts the plain text of an uploaded resume.
/// PDF parsing is CPU-bound, so it runs on the blocking pool.
pub async fn extract_resume_text(upload: &ResumeUpload) -> Result<String, AppError> {
    if upload.is_plain_text() {
        return Ok(String::from_utf8_lossy(&upload.bytes).into_owned());
    }

    let bytes = upload.bytes.clone();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Error reading PDF file: {e}")))?;

    debug!(
        "Extracted {} characters from '{}'",
        text.chars().count(),
        upload.file_name
    );
    Ok(text)
}
