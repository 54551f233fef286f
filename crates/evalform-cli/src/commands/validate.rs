//! The `evalform validate` command.

use std::path::PathBuf;

use anyhow::Result;

use evalform_core::config::load_config_from;
use evalform_core::parser::load_forms;
use evalform_core::validation::{validate_form, IssueLevel};

pub fn execute(form_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let forms = load_forms(&form_path)?;

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for (path, form) in &forms {
        println!(
            "Form: {} ({} questions) [{}]",
            form.form_name,
            form.questions.len(),
            path.display()
        );

        let issues = validate_form(form, Some(&config.options));
        for issue in &issues {
            let prefix = issue
                .question
                .map(|i| format!("  [question {}]", i + 1))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} {}: {}", issue.level, issue.message);
            match issue.level {
                IssueLevel::Error => total_errors += 1,
                IssueLevel::Warning => total_warnings += 1,
            }
        }
    }

    if total_errors == 0 && total_warnings == 0 {
        println!("All forms valid.");
    } else if total_errors == 0 {
        println!("\n{total_warnings} warning(s) found.");
    } else {
        anyhow::bail!("{total_errors} error(s), {total_warnings} warning(s) found");
    }

    Ok(())
}
