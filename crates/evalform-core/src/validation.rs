//! Form validation rules.
//!
//! Three layers live here:
//! - the incremental category-weight check run on every weight edit,
//! - the answer-type gate that decides which "add answer" actions are enabled,
//! - whole-form validation producing field-level issues for `validate`/`submit`.
//!
//! Category weight overflow is always a warning. It never blocks submission.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SelectionOptions;
use crate::error::FormError;
use crate::model::{AnswerKind, EvaluationForm, FormType, Question};

/// Upper bound for category sums and percentage weights.
pub const MAX_PERCENT: f64 = 100.0;

/// Non-blocking warning: a category's weights add up to more than 100%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightWarning {
    pub category: String,
    pub total: f64,
}

impl fmt::Display for WeightWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total weight for category '{}' is {}%, which exceeds 100%",
            self.category, self.total
        )
    }
}

/// Check that a weight is a finite number in `[0, 100]`.
pub fn validate_percent(value: f64) -> Result<f64, FormError> {
    if value.is_finite() && (0.0..=MAX_PERCENT).contains(&value) {
        Ok(value)
    } else {
        Err(FormError::InvalidWeight { value })
    }
}

/// Check a question weight for the given form type. Points only need to be
/// non-negative; percentages are capped at 100.
pub fn validate_question_weight(form_type: FormType, value: f64) -> Result<f64, FormError> {
    match form_type {
        FormType::Percentage => validate_percent(value),
        FormType::Points if value.is_finite() && value >= 0.0 => Ok(value),
        FormType::Points => Err(FormError::InvalidWeight { value }),
    }
}

/// Sum of the category weights of every *other* question in the category of
/// question `index`, plus `candidate`.
pub fn category_total(
    form: &EvaluationForm,
    index: usize,
    candidate: f64,
) -> Result<f64, FormError> {
    let question = form.questions.get(index).ok_or(FormError::QuestionIndex {
        index,
        len: form.questions.len(),
    })?;

    let others: f64 = form
        .questions_in(&question.category)
        .filter(|(i, _)| *i != index)
        .filter_map(|(_, q)| q.category_weight)
        .sum();

    Ok(others + candidate)
}

/// Run the category weight check for a candidate value on question `index`.
///
/// Returns `Ok(Some(warning))` when the category would exceed 100%, and
/// `Ok(None)` when it would not. Rejects candidates outside `[0, 100]` and
/// any use on a points form.
pub fn check_category_weight(
    form: &EvaluationForm,
    index: usize,
    candidate: f64,
) -> Result<Option<WeightWarning>, FormError> {
    if form.form_type != FormType::Percentage {
        return Err(FormError::CategoryWeightUnavailable);
    }
    let candidate = validate_percent(candidate)?;
    let total = category_total(form, index, candidate)?;

    if total > MAX_PERCENT {
        let category = form.questions[index].category.clone();
        Ok(Some(WeightWarning { category, total }))
    } else {
        Ok(None)
    }
}

/// Every category of a percentage form whose weights exceed 100%, in
/// category selection order.
pub fn weight_warnings(form: &EvaluationForm) -> Vec<WeightWarning> {
    if form.form_type != FormType::Percentage {
        return Vec::new();
    }
    form.categories
        .iter()
        .filter_map(|category| {
            let total = form.category_weight_total(category);
            (total > MAX_PERCENT).then(|| WeightWarning {
                category: category.clone(),
                total,
            })
        })
        .collect()
}

/// Which "add answer" actions are enabled for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerGate {
    pub range: bool,
    pub boolean: bool,
    pub comment: bool,
}

impl AnswerGate {
    pub fn allows(&self, kind: AnswerKind) -> bool {
        match kind {
            AnswerKind::Range => self.range,
            AnswerKind::Boolean => self.boolean,
            AnswerKind::Comment => self.comment,
        }
    }
}

/// Compute the answer gate: a boolean answer locks out range answers and a
/// second boolean; any range answer locks out booleans. Comments are free.
pub fn answer_gate(question: &Question) -> AnswerGate {
    let has_boolean = question.has_answer_kind(AnswerKind::Boolean);
    let has_range = question.has_answer_kind(AnswerKind::Range);
    AnswerGate {
        range: !has_boolean,
        boolean: !has_boolean && !has_range,
        comment: true,
    }
}

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Blocks submission.
    Error,
    /// Shown to the user, never blocks.
    Warning,
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLevel::Error => write!(f, "ERROR"),
            IssueLevel::Warning => write!(f, "WARNING"),
        }
    }
}

/// A field-level finding from [`validate_form`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub level: IssueLevel,
    /// Global index of the question concerned, if any.
    pub question: Option<usize>,
    pub message: String,
}

impl ValidationIssue {
    fn error(question: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            question,
            message: message.into(),
        }
    }

    fn warning(question: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            question,
            message: message.into(),
        }
    }
}

/// Returns true if any issue blocks submission.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.level == IssueLevel::Error)
}

/// Validate a whole form.
///
/// When `options` is given, categories and severity must come from it.
pub fn validate_form(
    form: &EvaluationForm,
    options: Option<&SelectionOptions>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if form.form_name.trim().is_empty() {
        issues.push(ValidationIssue::error(None, "form name is required"));
    }
    if form.categories.is_empty() {
        issues.push(ValidationIssue::error(None, "at least one category is required"));
    }
    if form.severity.trim().is_empty() {
        issues.push(ValidationIssue::error(None, "severity is required"));
    }

    let mut seen = HashSet::new();
    for category in &form.categories {
        if !seen.insert(category.as_str()) {
            issues.push(ValidationIssue::error(None, format!("duplicate category: {category}")));
        }
    }

    if let Some(options) = options {
        for category in &form.categories {
            if !options.allows_category(category) {
                issues.push(ValidationIssue::error(None, format!("unknown category: {category}")));
            }
        }
        if !form.severity.trim().is_empty() && !options.allows_severity(&form.severity) {
            issues.push(ValidationIssue::error(
                None,
                format!("unknown severity: {}", form.severity),
            ));
        }
    }

    for (index, question) in form.questions.iter().enumerate() {
        validate_question(form, index, question, &mut issues);
    }

    for warning in weight_warnings(form) {
        issues.push(ValidationIssue::warning(None, warning.to_string()));
    }

    for category in &form.categories {
        if form.questions_in(category).next().is_none() {
            issues.push(ValidationIssue::warning(
                None,
                format!("category '{category}' has no questions"),
            ));
        }
    }

    issues
}

fn validate_question(
    form: &EvaluationForm,
    index: usize,
    question: &Question,
    issues: &mut Vec<ValidationIssue>,
) {
    let at = Some(index);

    if question.text.trim().is_empty() {
        issues.push(ValidationIssue::error(at, "question text is required"));
    }
    if !form.has_category(&question.category) {
        issues.push(ValidationIssue::error(
            at,
            format!("category '{}' is not selected on this form", question.category),
        ));
    }

    let booleans = question.count_answer_kind(AnswerKind::Boolean);
    if booleans > 1 {
        issues.push(ValidationIssue::error(
            at,
            format!("{booleans} boolean answers; at most one is allowed"),
        ));
    }
    if booleans > 0 && question.has_answer_kind(AnswerKind::Range) {
        issues.push(ValidationIssue::error(
            at,
            "boolean and range answers cannot be mixed",
        ));
    }

    if let Some(weight) = question.category_weight {
        match form.form_type {
            FormType::Percentage => {
                if validate_percent(weight).is_err() {
                    issues.push(ValidationIssue::error(
                        at,
                        format!("category weight {weight} is outside 0-100"),
                    ));
                }
            }
            FormType::Points => issues.push(ValidationIssue::warning(
                at,
                "category weight is ignored on points forms",
            )),
        }
    }

    if let Some(weight) = question.question_weight {
        if validate_question_weight(form.form_type, weight).is_err() {
            issues.push(ValidationIssue::error(
                at,
                format!("question weight {weight} is invalid for a {} form", form.form_type),
            ));
        }
    }
}
