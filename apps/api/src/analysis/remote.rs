//! Remote analysis backend: forwards the form to another service's `/analyze`
//! endpoint and validates what comes back.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};

use crate::analysis::{AnalysisRequest, AnalysisSource};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;

#[derive(Clone)]
pub struct RemoteAnalysisSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl RemoteAnalysisSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for the remote analysis backend")?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    fn build_form(request: &AnalysisRequest) -> Result<Form, AppError> {
        let mut form = Form::new().text("jobDescription", request.job_description.clone());

        if let Some(upload) = &request.resume {
            let mut part =
                Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name.clone());
            if let Some(content_type) = &upload.content_type {
                part = part.mime_str(content_type).map_err(|e| {
                    AppError::Validation(format!("Invalid resume content type: {e}"))
                })?;
            }
            form = form.part("resumeFile", part);
        }

        Ok(form)
    }

    fn map_send_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Timeout(self.timeout)
        } else {
            AppError::Transport(format!("POST {} failed: {err}", self.url))
        }
    }
}

#[async_trait]
impl AnalysisSource for RemoteAnalysisSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn fetch(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        let form = Self::build_form(request)?;

        debug!("Forwarding analysis request to {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            warn!("Remote analysis backend returned {status}");
            return Err(AppError::Transport(format!(
                "backend returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        serde_json::from_str::<AnalysisResult>(&body)
            .map_err(|e| AppError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ResumeUpload;
    use axum::{http::StatusCode, routing::post, Router};
    use bytes::Bytes;

    async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/analyze")
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            resume: Some(ResumeUpload {
                file_name: "resume.txt".to_string(),
                content_type: Some("text/plain".to_string()),
                bytes: Bytes::from_static(b"Rust Kubernetes"),
            }),
            job_description: "Rust Kafka".to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_response_is_parsed() {
        let app = Router::new().route(
            "/analyze",
            post(|| async {
                r#"{"overallScore":82,"keywords":{"matching":["Agile"],"missing":["JIRA"]},
                    "feedback":[{"title":"A","content":"a"}]}"#
            }),
        );
        let url = spawn_backend(app).await;
        let source = RemoteAnalysisSource::new(url, Duration::from_secs(5)).unwrap();

        let result = source.fetch(&request()).await.unwrap();
        assert_eq!(result.overall_score.value(), 82);
        assert_eq!(result.keywords.matching, ["Agile"]);
    }

    #[tokio::test]
    async fn test_keyword_backend_round_trip_over_http() {
        let app = Router::new().route(
            "/analyze",
            post(crate::analysis::handlers::handle_analyze).with_state(
                crate::state::AppState::for_source(std::sync::Arc::new(
                    crate::analysis::keyword::KeywordAnalysisSource,
                )),
            ),
        );
        let url = spawn_backend(app).await;
        let source = RemoteAnalysisSource::new(url, Duration::from_secs(5)).unwrap();

        let result = source.fetch(&request()).await.unwrap();
        assert_eq!(result.keywords.matching, ["rust"]);
        assert_eq!(result.keywords.missing, ["kafka"]);
        assert_eq!(result.overall_score.value(), 65);
    }

    #[tokio::test]
    async fn test_unparseable_body_is_malformed() {
        let app = Router::new().route("/analyze", post(|| async { "<html>oops</html>" }));
        let url = spawn_backend(app).await;
        let source = RemoteAnalysisSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.fetch(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_malformed() {
        let app = Router::new().route(
            "/analyze",
            post(|| async {
                r#"{"overallScore":10,"keywords":{"matching":[],"missing":[]},"feedback":[]}"#
            }),
        );
        let url = spawn_backend(app).await;
        let source = RemoteAnalysisSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.fetch(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_error_status_is_transport_failure() {
        let app = Router::new().route(
            "/analyze",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
        );
        let url = spawn_backend(app).await;
        let source = RemoteAnalysisSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.fetch(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::Transport(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            RemoteAnalysisSource::new(format!("http://{addr}/analyze"), Duration::from_secs(5))
                .unwrap();
        let err = source.fetch(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let app = Router::new().route(
            "/analyze",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let url = spawn_backend(app).await;
        let source = RemoteAnalysisSource::new(url, Duration::from_millis(100)).unwrap();

        let err = source.fetch(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)), "got {err:?}");
    }
}
