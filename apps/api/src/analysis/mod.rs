//! Analysis sources: everything that can answer "fetch analysis" for a resume.
//!
//! `AppState` carries one `Arc<dyn AnalysisSource>` chosen at startup from
//! `ANALYSIS_BACKEND`. Callers never know which backend produced a result.

pub mod handlers;
pub mod keyword;
pub mod mock;
pub mod pdf;
pub mod remote;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::config::{AnalysisBackend, Config};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;

/// An uploaded resume file, kept as raw bytes until a backend needs its text.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeUpload {
    pub fn is_plain_text(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/plain"))
            || self.file_name.to_ascii_lowercase().ends_with(".txt")
    }
}

/// Form input for one analysis. The mock backend ignores it entirely.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub resume: Option<ResumeUpload>,
    pub job_description: String,
}

#[async_trait]
pub trait AnalysisSource: Send + Sync {
    /// Short backend label for logs and status output.
    fn name(&self) -> &'static str;

    async fn fetch(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError>;
}

/// Runs `source.fetch` under a deadline. Expiry maps to `AppError::Timeout`.
pub async fn fetch_with_timeout(
    source: &dyn AnalysisSource,
    request: &AnalysisRequest,
    limit: Duration,
) -> Result<AnalysisResult, AppError> {
    tokio::time::timeout(limit, source.fetch(request))
        .await
        .map_err(|_| AppError::Timeout(limit))?
}

/// Builds the configured backend.
pub fn build_source(config: &Config) -> Result<Arc<dyn AnalysisSource>> {
    let source: Arc<dyn AnalysisSource> = match config.analysis_backend {
        AnalysisBackend::Mock => Arc::new(mock::MockAnalysisSource::new(config.analysis_delay)),
        AnalysisBackend::Keyword => Arc::new(keyword::KeywordAnalysisSource),
        AnalysisBackend::Remote => {
            let url = config
                .remote_url
                .clone()
                .context("ANALYSIS_REMOTE_URL is required for the remote backend")?;
            Arc::new(remote::RemoteAnalysisSource::new(url, config.analysis_timeout)?)
        }
    };
    info!("Analysis backend: {}", source.name());
    Ok(source)
}
