use chrono::{DateTime, Utc};

use crate::render::{html_escape, DashboardView};

/// Seconds between page reloads while an analysis is running.
const BUSY_REFRESH_SECS: u32 = 1;

/// Everything the dashboard page shows besides the rendered regions.
pub struct PageContext<'a> {
    pub busy: bool,
    pub view: &'a DashboardView,
    pub last_error: Option<&'a str>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Render the full dashboard page: upload form, busy indicator, and result regions.
pub fn render_page(ctx: &PageContext<'_>) -> String {
    let refresh = if ctx.busy {
        format!(r#"<meta http-equiv="refresh" content="{BUSY_REFRESH_SECS}">"#)
    } else {
        String::new()
    };

    let (button_attrs, spinner_class, button_text) = if ctx.busy {
        (" disabled", "spinner-border spinner-border-sm", "Analyzing...")
    } else {
        ("", "spinner-border spinner-border-sm d-none", "Analyze My Resume")
    };

    let alert = ctx
        .last_error
        .map(|msg| {
            format!(
                r#"<div class="alert alert-danger mt-3" role="alert">{}</div>"#,
                html_escape(msg)
            )
        })
        .unwrap_or_default();

    let results_class = if ctx.view.is_empty() {
        "mt-5 d-none"
    } else {
        "mt-5"
    };

    let completed = ctx
        .completed_at
        .map(|t| {
            format!(
                r#"<p class="text-muted small">Last analyzed {}</p>"#,
                t.format("%Y-%m-%d %H:%M:%S UTC")
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    {refresh}
    <title>ResumeLens</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
    <link href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css" rel="stylesheet">
</head>
<body class="bg-light">
<main class="container py-5">
    <h1 class="mb-4">ResumeLens</h1>
    <form id="resume-form" method="post" action="/dashboard/analyze" enctype="multipart/form-data">
        <div class="mb-3">
            <label for="resumeFile" class="form-label">Resume (PDF)</label>
            <input class="form-control" type="file" id="resumeFile" name="resumeFile" accept=".pdf,.txt">
        </div>
        <div class="mb-3">
            <label for="jobDescription" class="form-label">Job Description</label>
            <textarea class="form-control" id="jobDescription" name="jobDescription" rows="6"></textarea>
        </div>
        <button type="submit" id="analyzeBtn" class="btn btn-primary"{button_attrs}>
            <span class="{spinner_class}" role="status" aria-hidden="true"></span>
            <span id="btn-text">{button_text}</span>
        </button>
    </form>
    {alert}
    <section id="results" class="{results_class}">
        {completed}
        <div class="row">
            <div class="col-md-4" id="score-area">{score}</div>
            <div class="col-md-8" id="keyword-analysis">{keywords}</div>
        </div>
        <h5 class="mt-4">Actionable Feedback</h5>
        <div class="accordion" id="feedback-accordion">{feedback}</div>
        <div class="mt-4" id="career-paths">{careers}</div>
    </section>
</main>
<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"></script>
</body>
</html>"#,
        score = ctx.view.score_area.html(),
        keywords = ctx.view.keyword_area,
        feedback = ctx.view.feedback_area,
        careers = ctx.view.career_area,
    )
}
