//! Dashboard session: the Idle → Busy → Idle state machine around one analysis.
//!
//! Exactly one analysis may be in flight. A submit while Busy is rejected and
//! starts nothing. There is no way to cancel a running analysis.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{fetch_with_timeout, AnalysisRequest, AnalysisSource};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::render::page::{render_page, PageContext};
use crate::render::{render, DashboardView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Busy,
}

/// Notified on the two edges of every analysis, so a busy indicator can follow along.
pub trait BusyObserver: Send + Sync {
    fn on_analysis_started(&self);
    fn on_analysis_finished(&self);
}

pub struct LoggingObserver;

impl BusyObserver for LoggingObserver {
    fn on_analysis_started(&self) {
        info!("Analysis started; dashboard is busy");
    }

    fn on_analysis_finished(&self) {
        info!("Analysis finished; dashboard is idle");
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub phase: Phase,
    pub has_result: bool,
    pub last_error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

struct SessionState {
    phase: Phase,
    view: DashboardView,
    live: Option<Arc<AnalysisResult>>,
    last_error: Option<String>,
    completed_at: Option<DateTime<Utc>>,
}

pub struct AnalysisSession {
    source: Arc<dyn AnalysisSource>,
    observer: Arc<dyn BusyObserver>,
    timeout: Duration,
    state: Mutex<SessionState>,
}

impl AnalysisSession {
    pub fn new(
        source: Arc<dyn AnalysisSource>,
        observer: Arc<dyn BusyObserver>,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            observer,
            timeout,
            state: Mutex::new(SessionState {
                phase: Phase::Idle,
                view: DashboardView::default(),
                live: None,
                last_error: None,
                completed_at: None,
            }),
        }
    }

    /// Idle → Busy. Spawns the fetch-and-render task and returns its handle.
    pub async fn submit(
        self: &Arc<Self>,
        request: AnalysisRequest,
    ) -> Result<JoinHandle<()>, AppError> {
        {
            let mut state = self.state.lock().await;
            if state.phase == Phase::Busy {
                warn!("Rejected submit: analysis already in progress");
                return Err(AppError::Busy);
            }
            state.phase = Phase::Busy;
        }
        self.observer.on_analysis_started();

        let session = Arc::clone(self);
        Ok(tokio::spawn(async move { session.run(request).await }))
    }

    async fn run(&self, request: AnalysisRequest) {
        let run_id = Uuid::new_v4();
        info!(%run_id, backend = self.source.name(), "Running analysis");

        let outcome = fetch_with_timeout(self.source.as_ref(), &request, self.timeout).await;

        {
            let mut state = self.state.lock().await;
            match outcome {
                Ok(result) => {
                    render(&mut state.view, &result);
                    info!(%run_id, score = %result.overall_score, "Analysis rendered");
                    state.live = Some(Arc::new(result));
                    state.last_error = None;
                    state.completed_at = Some(Utc::now());
                }
                Err(e) => {
                    warn!(%run_id, "Analysis failed: {e}");
                    state.last_error = Some(e.to_string());
                }
            }
            state.phase = Phase::Idle;
        }
        self.observer.on_analysis_finished();
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase
    }

    /// The result currently bound to the display, if any.
    pub async fn live_result(&self) -> Option<Arc<AnalysisResult>> {
        self.state.lock().await.live.clone()
    }

    pub async fn status(&self) -> SessionStatus {
        let state = self.state.lock().await;
        SessionStatus {
            phase: state.phase,
            has_result: state.live.is_some(),
            last_error: state.last_error.clone(),
            completed_at: state.completed_at,
        }
    }

    pub async fn page(&self) -> String {
        let state = self.state.lock().await;
        render_page(&PageContext {
            busy: state.phase == Phase::Busy,
            view: &state.view,
            last_error: state.last_error.as_deref(),
            completed_at: state.completed_at,
        })
    }

    #[cfg(test)]
    async fn gauge_id(&self) -> Option<Uuid> {
        self.state
            .lock()
            .await
            .view
            .score_area
            .gauge()
            .map(|g| g.id())
    }
}
