//! The `evalform build` command.
//!
//! Replays an action script against a fresh or existing form, the way the
//! builder UI would apply user edits one by one.

use std::path::PathBuf;

use anyhow::{Context, Result};

use evalform_core::config::load_config_from;
use evalform_core::parser::{parse_action_script, parse_form, save_form};
use evalform_core::{EvaluationForm, FormStore};

pub fn execute(
    script: PathBuf,
    from: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let start = match &from {
        Some(path) => parse_form(path)?,
        None => EvaluationForm {
            form_type: config.default_form_type,
            ..Default::default()
        },
    };
    let mut store = FormStore::with_form(start, config.options.clone());

    let actions = parse_action_script(&script)?;
    let total = actions.len();
    tracing::debug!("loaded {total} action(s) from {}", script.display());
    let mut changed = 0;

    for (step, action) in actions.into_iter().enumerate() {
        let outcome = store
            .apply(action.clone())
            .with_context(|| format!("action {} failed: {action:?}", step + 1))?;
        if outcome.changed {
            changed += 1;
        }
        if let Some(warning) = outcome.warning {
            eprintln!("  [action {}] WARNING: {warning}", step + 1);
        }
    }

    eprintln!("Applied {total} action(s), {changed} changed the form.");
    for warning in store.warnings() {
        eprintln!("  WARNING: {warning}");
    }

    let form = store.into_form();
    match output {
        Some(path) => {
            save_form(&form, &path)?;
            eprintln!("Form written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&form)?),
    }

    Ok(())
}
