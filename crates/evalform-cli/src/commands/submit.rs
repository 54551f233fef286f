//! The `evalform submit` command.

use std::path::PathBuf;

use anyhow::Result;

use evalform_core::config::{load_config_from, SinkKind};
use evalform_core::parser::parse_form;
use evalform_core::traits::{FormPayload, FormSink, JsonFileSink, LogSink};
use evalform_core::validation::{has_errors, validate_form, IssueLevel};

pub async fn execute(
    form_path: PathBuf,
    sink: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let sink_kind = match sink {
        Some(s) => s.parse::<SinkKind>().map_err(|e| anyhow::anyhow!(e))?,
        None => config.sink,
    };

    let form = parse_form(&form_path)?;
    let issues = validate_form(&form, Some(&config.options));
    for issue in &issues {
        let at = issue
            .question
            .map(|i| format!(" [question {}]", i + 1))
            .unwrap_or_default();
        println!("{}{at}: {}", issue.level, issue.message);
    }
    if has_errors(&issues) {
        let errors = issues
            .iter()
            .filter(|i| i.level == IssueLevel::Error)
            .count();
        anyhow::bail!("form has {errors} error(s); not submitted");
    }

    let sink: Box<dyn FormSink> = match sink_kind {
        SinkKind::Log => Box::new(LogSink),
        SinkKind::Json => Box::new(JsonFileSink::new(&config.output_dir)),
    };

    let payload = FormPayload::new(form);
    let receipt = sink.submit(&payload).await?;

    println!("Submitted {} via {}", receipt.id, receipt.sink);
    if let Some(location) = receipt.location {
        println!("Written to {}", location.display());
    }

    Ok(())
}
