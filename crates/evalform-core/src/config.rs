//! evalform configuration.
//!
//! Configuration holds the selectable category/severity options offered by
//! the builder and where CLI output goes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::FormType;

/// The category and severity values the selector offers.
///
/// An empty list means "anything goes".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOptions {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_severities")]
    pub severities: Vec<String>,
}

fn default_categories() -> Vec<String> {
    ["IT", "HR", "Finance", "Marketing"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_severities() -> Vec<String> {
    ["Development", "Support", "Sales", "Design"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            severities: default_severities(),
        }
    }
}

impl SelectionOptions {
    /// Options that accept any category and severity.
    pub fn unrestricted() -> Self {
        Self {
            categories: Vec::new(),
            severities: Vec::new(),
        }
    }

    pub fn allows_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == category)
    }

    pub fn allows_severity(&self, severity: &str) -> bool {
        self.severities.is_empty() || self.severities.iter().any(|s| s == severity)
    }
}

/// Where `submit` sends a finished form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Log the payload.
    #[default]
    Log,
    /// Write the payload as JSON into the output directory.
    Json,
}

impl std::str::FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(SinkKind::Log),
            "json" => Ok(SinkKind::Json),
            other => Err(format!("unknown sink: {other}")),
        }
    }
}

/// Top-level evalform configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalformConfig {
    /// Selectable categories and severities.
    #[serde(default)]
    pub options: SelectionOptions,
    /// Form type for newly created forms.
    #[serde(default)]
    pub default_form_type: FormType,
    /// Default submission sink.
    #[serde(default)]
    pub sink: SinkKind,
    /// Output directory for exported payloads and previews.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./evalform-output")
}

impl Default for EvalformConfig {
    fn default() -> Self {
        Self {
            options: SelectionOptions::default(),
            default_form_type: FormType::default(),
            sink: SinkKind::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        // Substituted values are copied verbatim, never rescanned.
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `evalform.toml` in the current directory
/// 2. `~/.config/evalform/config.toml`
///
/// `EVALFORM_OUTPUT_DIR` overrides the output directory.
pub fn load_config() -> Result<EvalformConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EvalformConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("evalform.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => EvalformConfig::default(),
    };

    if let Ok(dir) = std::env::var("EVALFORM_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Parse a config TOML string, resolving `${VAR}` references in the output path.
pub fn parse_config_str(content: &str) -> Result<EvalformConfig> {
    let mut config: EvalformConfig = toml::from_str(content)?;
    let output = config.output_dir.to_string_lossy().into_owned();
    config.output_dir = PathBuf::from(resolve_env_vars(&output));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("evalform"))
}
