use crate::models::analysis::FeedbackItem;
use crate::render::html_escape;

/// One collapsible entry of the feedback accordion.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub expanded: bool,
}

/// Exactly the first panel starts expanded.
pub fn panels(items: &[FeedbackItem]) -> Vec<Panel<'_>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| Panel {
            title: &item.title,
            content: &item.content,
            expanded: index == 0,
        })
        .collect()
}

pub fn render_feedback_accordion(items: &[FeedbackItem]) -> String {
    panels(items)
        .iter()
        .enumerate()
        .map(|(index, panel)| {
            let (button_class, body_class) = if panel.expanded {
                ("accordion-button", "accordion-collapse collapse show")
            } else {
                ("accordion-button collapsed", "accordion-collapse collapse")
            };
            format!(
                r##"<div class="accordion-item">
    <h2 class="accordion-header" id="heading-{index}">
        <button class="{button_class}" type="button" data-bs-toggle="collapse" data-bs-target="#collapse-{index}" aria-expanded="{expanded}">
            {title}
        </button>
    </h2>
    <div id="collapse-{index}" class="{body_class}" data-bs-parent="#feedback-accordion">
        <div class="accordion-body">
            {content}
        </div>
    </div>
</div>"##,
                expanded = panel.expanded,
                title = html_escape(panel.title),
                content = html_escape(panel.content),
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}
