//! Form and action script file parsing.
//!
//! Forms are stored as TOML or JSON using the payload field names
//! (`formName`, `formTypeOption`, ...). The format is picked from the file
//! extension; anything that is not `.json` is read as TOML.
//!
//! Action scripts are TOML files holding an ordered `[[actions]]` list, each
//! entry tagged by `type`:
//!
//! ```toml
//! [[actions]]
//! type = "select_categories"
//! categories = ["IT", "HR"]
//!
//! [[actions]]
//! type = "set_category_weight"
//! index = 0
//! weight = 40.0
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::EvaluationForm;
use crate::store::FormAction;

/// On-disk form encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFormat {
    Toml,
    Json,
}

impl FormFormat {
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "json") {
            FormFormat::Json
        } else {
            FormFormat::Toml
        }
    }
}

fn is_form_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "toml" || ext == "json")
}

/// Parse a single form file.
pub fn parse_form(path: &Path) -> Result<EvaluationForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form file: {}", path.display()))?;

    parse_form_str(&content, FormFormat::from_path(path), path)
}

/// Parse form content in the given format (useful for testing).
pub fn parse_form_str(
    content: &str,
    format: FormFormat,
    source_path: &Path,
) -> Result<EvaluationForm> {
    match format {
        FormFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display())),
        FormFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display())),
    }
}

/// Recursively load every form file in a directory, sorted by path.
///
/// Files that fail to parse are skipped with a warning. Files that look like
/// action scripts (a top-level `actions` list) are skipped silently.
pub fn load_form_directory(dir: &Path) -> Result<Vec<(PathBuf, EvaluationForm)>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    collect_form_paths(dir, &mut paths)?;
    paths.sort();

    let mut forms = Vec::new();
    for path in paths {
        if is_action_script(&path) {
            tracing::debug!("skipping action script {}", path.display());
            continue;
        }
        match parse_form(&path) {
            Ok(form) => forms.push((path, form)),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(forms)
}

fn collect_form_paths(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            collect_form_paths(&path, paths)?;
        } else if is_form_file(&path) {
            paths.push(path);
        }
    }
    Ok(())
}

fn is_action_script(path: &Path) -> bool {
    if FormFormat::from_path(path) != FormFormat::Toml {
        return false;
    }
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| content.parse::<toml::Table>().ok())
        .is_some_and(|table| table.contains_key("actions"))
}

/// Load a single form, or every form under a directory.
pub fn load_forms(path: &Path) -> Result<Vec<(PathBuf, EvaluationForm)>> {
    if path.is_dir() {
        load_form_directory(path)
    } else {
        Ok(vec![(path.to_path_buf(), parse_form(path)?)])
    }
}

/// Write a form to `path`, as JSON or TOML depending on the extension.
pub fn save_form(form: &EvaluationForm, path: &Path) -> Result<()> {
    let content = match FormFormat::from_path(path) {
        FormFormat::Json => serde_json::to_string_pretty(form)?,
        FormFormat::Toml => toml::to_string_pretty(form)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write form: {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ActionScriptFile {
    #[serde(default)]
    actions: Vec<FormAction>,
}

/// Parse an action script file.
pub fn parse_action_script(path: &Path) -> Result<Vec<FormAction>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read action script: {}", path.display()))?;

    parse_action_script_str(&content, path)
}

/// Parse action script TOML (useful for testing).
pub fn parse_action_script_str(content: &str, source_path: &Path) -> Result<Vec<FormAction>> {
    let parsed: ActionScriptFile = toml::from_str(content)
        .with_context(|| format!("failed to parse action script: {}", source_path.display()))?;
    Ok(parsed.actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, AnswerKind, FormType};

    const FORM_TOML: &str = r#"
formName = "Support call QA"
formDescription = "Inbound support calls"
approvalRequired = true
agentResponseOption = "allowAcknowledge"
formTypeOption = "percentage"
categories = ["IT", "HR"]
severity = "Support"
scoringBand = [60.0, 90.0]

[[questions]]
text = "Did the agent verify the caller?"
category = "IT"
categoryWeight = 40.0

[[questions.answers]]
type = "range"
answerText = "Yes"
answerValue = "10"

[[questions]]
text = "Was the tone professional?"
category = "HR"

[[questions.answers]]
type = "boolean"
trueValue = "5"
falseValue = "0"

[[questions.answers]]
type = "comment"
"#;

    const SCRIPT_TOML: &str = r#"
[[actions]]
type = "set_name"
name = "Scripted"

[[actions]]
type = "select_categories"
categories = ["IT"]

[[actions]]
type = "add_answer"
index = 0
kind = "comment"
"#;

    #[test]
    fn parse_toml_form() {
        let form = parse_form_str(FORM_TOML, FormFormat::Toml, Path::new("qa.toml")).unwrap();
        assert_eq!(form.form_name, "Support call QA");
        assert!(form.approval_required);
        assert_eq!(form.form_type, FormType::Percentage);
        assert_eq!(form.scoring_band.max(), 90.0);
        assert!(form.active);
        assert_eq!(form.questions.len(), 2);
        assert_eq!(form.questions[0].category_weight, Some(40.0));
        assert_eq!(
            form.questions[1].answers[0],
            Answer::Boolean {
                true_value: "5".into(),
                false_value: "0".into()
            }
        );
        assert_eq!(form.questions[1].answers[1].kind(), AnswerKind::Comment);
    }

    #[test]
    fn parse_minimal_json_form() {
        let json = r#"{ "formName": "Bare" }"#;
        let form = parse_form_str(json, FormFormat::Json, Path::new("bare.json")).unwrap();
        assert_eq!(form.form_name, "Bare");
        assert!(form.categories.is_empty());
        assert_eq!(form.scoring_band.midpoint(), 0.0);
    }

    #[test]
    fn inverted_band_fails_to_parse() {
        let bad = "formName = \"x\"\nscoringBand = [90.0, 10.0]\n";
        let err = parse_form_str(bad, FormFormat::Toml, Path::new("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("bad.toml"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_form_str(bad, FormFormat::Toml, Path::new("bad.toml")).is_err());
    }

    #[test]
    fn parse_script() {
        let actions = parse_action_script_str(SCRIPT_TOML, Path::new("s.toml")).unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(
            actions[2],
            FormAction::AddAnswer {
                index: 0,
                kind: AnswerKind::Comment
            }
        );
    }

    #[test]
    fn unknown_action_type_is_an_error() {
        let bad = "[[actions]]\ntype = \"launch_rocket\"\n";
        assert!(parse_action_script_str(bad, Path::new("s.toml")).is_err());
    }

    #[test]
    fn load_directory_skips_scripts_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.toml"), FORM_TOML).unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{ "formName": "A" }"#).unwrap();
        std::fs::write(dir.path().join("actions.toml"), SCRIPT_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[[[").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let forms = load_form_directory(dir.path()).unwrap();
        let names: Vec<&str> = forms.iter().map(|(_, f)| f.form_name.as_str()).collect();
        assert_eq!(names, vec!["A", "Support call QA"]);
    }

    #[test]
    fn save_and_reload_json() {
        let dir = tempfile::tempdir().unwrap();
        let form = parse_form_str(FORM_TOML, FormFormat::Toml, Path::new("qa.toml")).unwrap();
        let out = dir.path().join("nested").join("qa.json");

        save_form(&form, &out).unwrap();
        assert_eq!(parse_form(&out).unwrap(), form);
    }

    #[test]
    fn load_forms_accepts_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.toml");
        std::fs::write(&path, FORM_TOML).unwrap();
        assert_eq!(load_forms(&path).unwrap().len(), 1);
        assert!(load_form_directory(&path).is_err());
    }
}
