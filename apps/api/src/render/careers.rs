use crate::models::analysis::CareerPath;
use crate::render::html_escape;

pub fn render_career_paths(paths: &[CareerPath]) -> String {
    if paths.is_empty() {
        return String::new();
    }

    let cards = paths
        .iter()
        .map(|path| {
            format!(
                r#"<div class="col-md-6 mb-3">
    <div class="card h-100">
        <div class="card-body">
            <h6 class="card-title">{}</h6>
            <p class="card-text">{}</p>
        </div>
    </div>
</div>"#,
                html_escape(&path.title),
                html_escape(&path.description)
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!("<h5>Suggested Career Paths</h5>\n<div class=\"row\">\n{cards}\n</div>")
}
