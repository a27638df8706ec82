use crate::render::html_escape;

const MATCHING_BADGE_CLASS: &str = "badge bg-success me-1 mb-1";
const MISSING_BADGE_CLASS: &str = "badge bg-warning text-dark me-1 mb-1";

/// Render both keyword groups as labeled badge lists, preserving list order.
pub fn render_keyword_groups(matching: &[String], missing: &[String]) -> String {
    format!(
        r#"<h6><i class="fa-solid fa-check-circle text-success"></i> Matching Keywords</h6>
<div class="mb-3 keywords-matching">{}</div>
<h6><i class="fa-solid fa-times-circle text-danger"></i> Missing Keywords</h6>
<div class="keywords-missing">{}</div>"#,
        render_badges(matching, MATCHING_BADGE_CLASS),
        render_badges(missing, MISSING_BADGE_CLASS),
    )
}

fn render_badges(words: &[String], class: &str) -> String {
    words
        .iter()
        .map(|kw| format!(r#"<span class="{class}">{}</span>"#, html_escape(kw)))
        .collect::<Vec<String>>()
        .join("")
}
