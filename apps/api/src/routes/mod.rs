pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::dashboard::handlers as dashboard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard
        .route("/", get(dashboard::handle_dashboard))
        .route("/dashboard/analyze", post(dashboard::handle_submit))
        .route("/dashboard/status", get(dashboard::handle_status))
        .route(
            "/api/v1/dashboard/result",
            get(dashboard::handle_live_result),
        )
        // Stateless analysis
        .route("/analyze", post(analysis::handle_analyze))
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .layer(body_limit)
        .with_state(state)
}
