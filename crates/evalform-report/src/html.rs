//! HTML form preview generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use evalform_core::band::PerformanceLabel;
use evalform_core::config::SelectionOptions;
use evalform_core::model::{Answer, EvaluationForm, FormType};
use evalform_core::validation::{self, IssueLevel, ValidationIssue};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

fn weight_cell(weight: Option<f64>) -> String {
    weight.map_or_else(|| "-".to_string(), |w| format!("{w}"))
}

/// Generate an HTML preview of a form, listing `issues` at the top.
pub fn generate_html(form: &EvaluationForm, issues: &[ValidationIssue]) -> String {
    let mut html = String::new();
    let title = if form.form_name.trim().is_empty() {
        "untitled form"
    } else {
        form.form_name.as_str()
    };

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>evalform preview: {}</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    if !form.form_description.is_empty() {
        html.push_str(&format!(
            "<p>{}</p>\n",
            html_escape(&form.form_description)
        ));
    }
    html.push_str(&format!(
        "<p class=\"meta\">{} form | severity: <strong>{}</strong> | approval required: {} | agent response: {} | active: {} | generated {}</p>\n",
        form.form_type,
        html_escape(&form.severity),
        yes_no(form.approval_required),
        form.agent_response_option,
        yes_no(form.active),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    if !issues.is_empty() {
        html.push_str("<section class=\"issues\">\n<h2>Validation</h2>\n<ul>\n");
        for issue in issues {
            let class = match issue.level {
                IssueLevel::Error => "error",
                IssueLevel::Warning => "warning",
            };
            let location = issue
                .question
                .map(|i| format!(" (question {})", i + 1))
                .unwrap_or_default();
            html.push_str(&format!(
                "<li class=\"{class}\"><strong>{}</strong>{location}: {}</li>\n",
                issue.level,
                html_escape(&issue.message)
            ));
        }
        html.push_str("</ul>\n</section>\n");
    }

    // Scoring band
    let label = PerformanceLabel::for_band(&form.scoring_band);
    html.push_str("<section class=\"band\">\n<h2>Scoring band</h2>\n");
    html.push_str(&format!(
        "<p>{}% to {}% <span class=\"label\" style=\"background: {}\">{}</span></p>\n",
        form.scoring_band.min(),
        form.scoring_band.max(),
        label.color(),
        label
    ));
    html.push_str("<ul class=\"guidance\">\n");
    for line in label.guidance() {
        html.push_str(&format!("<li>{}</li>\n", html_escape(line)));
    }
    html.push_str("</ul>\n</section>\n");

    // Category weight chart
    if form.form_type == FormType::Percentage && !form.categories.is_empty() {
        html.push_str("<section class=\"weights\">\n<h2>Category weights</h2>\n");
        html.push_str(&generate_bar_chart(form));
        html.push_str("</section>\n");
    }

    // Questions, grouped by category
    html.push_str("<section class=\"questions\">\n<h2>Questions</h2>\n");
    for category in &form.categories {
        html.push_str(&format!("<h3>{}</h3>\n", html_escape(category)));
        html.push_str("<table>\n<thead><tr><th>#</th><th>Question</th>");
        if form.form_type == FormType::Percentage {
            html.push_str("<th>Category weight</th>");
        }
        html.push_str("<th>Question weight</th><th>Answers</th></tr></thead>\n<tbody>\n");

        for (index, question) in form.questions_in(category) {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td>",
                index + 1,
                html_escape(&question.text)
            ));
            if form.form_type == FormType::Percentage {
                html.push_str(&format!("<td>{}</td>", weight_cell(question.category_weight)));
            }
            html.push_str(&format!(
                "<td>{}</td><td>{}</td></tr>\n",
                weight_cell(question.question_weight),
                render_answers(&question.answers)
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Form payload</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(form).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn render_answers(answers: &[Answer]) -> String {
    if answers.is_empty() {
        return "<em>none</em>".to_string();
    }
    let items: Vec<String> = answers
        .iter()
        .map(|answer| match answer {
            Answer::Range {
                answer_text,
                answer_value,
            } => format!(
                "<li>range: {} = {}</li>",
                html_escape(answer_text),
                html_escape(answer_value)
            ),
            Answer::Boolean {
                true_value,
                false_value,
            } => format!(
                "<li>boolean: true = {}, false = {}</li>",
                html_escape(true_value),
                html_escape(false_value)
            ),
            Answer::Comment { text } => {
                format!("<li>comment: {}</li>", html_escape(text))
            }
        })
        .collect();
    format!("<ul class=\"answers\">{}</ul>", items.concat())
}

/// Write an HTML preview to a file, validating the form first.
///
/// When `options` is given, categories and severity outside it are listed
/// as errors, the same way `validate` reports them.
pub fn write_html_preview(
    form: &EvaluationForm,
    options: Option<&SelectionOptions>,
    path: &Path,
) -> Result<()> {
    let issues = validation::validate_form(form, options);
    let html = generate_html(form, &issues);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write preview: {}", path.display()))?;
    Ok(())
}

/// One bar per category, scaled so 100% spans the full width. Bars over
/// 100% are clipped and drawn in the overflow colour.
fn generate_bar_chart(form: &EvaluationForm) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 160;

    let totals: Vec<(&String, f64)> = form
        .categories
        .iter()
        .map(|c| (c, form.category_weight_total(c)))
        .collect();

    let total_height = totals.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 80,
        total_height
    );

    for (i, (category, total)) in totals.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (total.min(validation::MAX_PERCENT) / validation::MAX_PERCENT
            * max_width as f64) as usize;

        let color = if *total > validation::MAX_PERCENT {
            "#ef4444"
        } else if *total == validation::MAX_PERCENT {
            "#22c55e"
        } else {
            "#3b82f6"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(category)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            total
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --error: #fde2e2; --warning: #fef9c3; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --error: #7f1d1d; --warning: #713f12; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); }
.issues li { padding: 0.25rem 0.5rem; margin: 0.25rem 0; list-style: none; border-radius: 4px; }
.error { background: var(--error); }
.warning { background: var(--warning); }
.label { color: #fff; padding: 0.2rem 0.6rem; border-radius: 4px; margin-left: 1rem; }
.answers { margin: 0; padding-left: 1rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
