//! Result rendering: turns an `AnalysisResult` into the dashboard's HTML regions.
//!
//! The regions themselves live in a `DashboardView` owned by the caller; `render`
//! only fills them.

pub mod careers;
pub mod feedback;
pub mod gauge;
pub mod keywords;
pub mod page;

use tracing::debug;

use crate::models::analysis::AnalysisResult;
use gauge::Gauge;

/// Display region for the score gauge. Holds at most one gauge instance.
#[derive(Debug, Default)]
pub struct ScoreArea {
    gauge: Option<Gauge>,
}

impl ScoreArea {
    pub fn gauge(&self) -> Option<&Gauge> {
        self.gauge.as_ref()
    }

    pub fn html(&self) -> &str {
        self.gauge.as_ref().map(Gauge::markup).unwrap_or_default()
    }
}

/// The externally-owned display regions the renderer writes into.
#[derive(Debug, Default)]
pub struct DashboardView {
    pub score_area: ScoreArea,
    pub keyword_area: String,
    pub feedback_area: String,
    pub career_area: String,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.score_area.gauge().is_none()
    }
}

/// Populates every region of `view` from `result`.
/// The previous gauge is released before anything else is written.
pub fn render(view: &mut DashboardView, result: &AnalysisResult) {
    let previous = view.score_area.gauge.take();
    let gauge = gauge::replace(previous, result.overall_score);
    debug!(
        gauge = %gauge.id(),
        overlay = %gauge.overlay_text(),
        filled_degrees = gauge.arcs().filled_sweep_degrees(),
        "Score area updated"
    );
    view.score_area.gauge = Some(gauge);

    view.keyword_area =
        keywords::render_keyword_groups(result.matching_keywords(), result.missing_keywords());
    view.feedback_area = feedback::render_feedback_accordion(result.feedback_items());
    view.career_area = careers::render_career_paths(&result.career_paths);
}

pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
