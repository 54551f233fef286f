//! Submission sinks.
//!
//! A finished form is wrapped in a [`FormPayload`] and handed to a
//! [`FormSink`]. Submission only happens after whole-form validation has
//! found no errors; weight warnings travel with the payload.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::EvaluationForm;
use crate::validation::{self, WeightWarning};

/// Trait for destinations that accept finished forms.
#[async_trait]
pub trait FormSink: Send + Sync {
    /// Short sink name (e.g. "log").
    fn name(&self) -> &str;

    /// Deliver one payload.
    async fn submit(&self, payload: &FormPayload) -> anyhow::Result<SubmitReceipt>;
}

/// What gets submitted: the form plus submission metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub form: EvaluationForm,
    /// Non-blocking weight warnings at submission time.
    #[serde(default)]
    pub warnings: Vec<WeightWarning>,
}

impl FormPayload {
    pub fn new(form: EvaluationForm) -> Self {
        let warnings = validation::weight_warnings(&form);
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            form,
            warnings,
        }
    }
}

/// Acknowledgement returned by a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub id: Uuid,
    pub sink: String,
    /// Where the payload ended up, for sinks that write files.
    #[serde(default)]
    pub location: Option<PathBuf>,
}

/// Logs the payload as JSON at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl FormSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn submit(&self, payload: &FormPayload) -> anyhow::Result<SubmitReceipt> {
        let json = serde_json::to_string(payload)?;
        tracing::info!(id = %payload.id, form = %payload.form.form_name, "submitted form: {json}");
        Ok(SubmitReceipt {
            id: payload.id,
            sink: self.name().to_string(),
            location: None,
        })
    }
}

/// Writes each payload to `<dir>/<form id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FormSink for JsonFileSink {
    fn name(&self) -> &str {
        "json"
    }

    async fn submit(&self, payload: &FormPayload) -> anyhow::Result<SubmitReceipt> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create output dir: {}", self.dir.display()))?;

        let path = self.dir.join(format!("{}.json", payload.id));
        let json = serde_json::to_string_pretty(payload)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("failed to write payload: {}", path.display()))?;

        tracing::info!("wrote submission to {}", path.display());
        Ok(SubmitReceipt {
            id: payload.id,
            sink: self.name().to_string(),
            location: Some(path),
        })
    }
}
