//! The `evalform preview` command.

use std::path::PathBuf;

use anyhow::Result;

use evalform_core::config::load_config_from;
use evalform_core::parser::parse_form;
use evalform_report::write_html_preview;

pub fn execute(form_path: PathBuf, output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let form = parse_form(&form_path)?;
    write_html_preview(&form, Some(&config.options), &output)?;
    println!("Preview written to {}", output.display());
    Ok(())
}
