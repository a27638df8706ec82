//! Axum route handlers for the HTML dashboard.

use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
    Json,
};

use crate::analysis::handlers::read_analysis_form;
use crate::dashboard::session::SessionStatus;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

/// GET /
pub async fn handle_dashboard(State(state): State<AppState>) -> Html<String> {
    Html(state.session.page().await)
}

/// POST /dashboard/analyze
///
/// Starts an analysis and sends the browser back to the dashboard, which shows
/// the busy indicator until the result is rendered. 409 while one is running.
pub async fn handle_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let request = read_analysis_form(multipart).await?;
    state.session.submit(request).await?;
    Ok(Redirect::to("/"))
}

/// GET /dashboard/status
pub async fn handle_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.session.status().await)
}

/// GET /api/v1/dashboard/result
pub async fn handle_live_result(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResult>, AppError> {
    let live = state
        .session
        .live_result()
        .await
        .ok_or_else(|| AppError::NotFound("No analysis has completed yet".to_string()))?;
    Ok(Json(live.as_ref().clone()))
}
