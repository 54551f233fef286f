//! Core data model types for evalform.
//!
//! These are the types that describe an evaluation form: the form header,
//! its questions grouped by category, and the answers each question offers.
//! The serialized shape (camelCase keys, tagged answers) is the payload that
//! a backend would consume.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// How an evaluated agent may respond to a finished evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentResponseOption {
    #[default]
    NoResponse,
    AllowAcknowledge,
    AllowAcknowledgeAndAppeal,
}

impl fmt::Display for AgentResponseOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentResponseOption::NoResponse => write!(f, "noResponse"),
            AgentResponseOption::AllowAcknowledge => write!(f, "allowAcknowledge"),
            AgentResponseOption::AllowAcknowledgeAndAppeal => {
                write!(f, "allowAcknowledgeAndAppeal")
            }
        }
    }
}

impl FromStr for AgentResponseOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noresponse" | "none" => Ok(AgentResponseOption::NoResponse),
            "allowacknowledge" | "acknowledge" => Ok(AgentResponseOption::AllowAcknowledge),
            "allowacknowledgeandappeal" | "appeal" => {
                Ok(AgentResponseOption::AllowAcknowledgeAndAppeal)
            }
            other => Err(format!("unknown agent response option: {other}")),
        }
    }
}

/// Whether questions are scored by percentage shares or by points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    #[default]
    Percentage,
    Points,
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormType::Percentage => write!(f, "percentage"),
            FormType::Points => write!(f, "points"),
        }
    }
}

impl FromStr for FormType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage" | "percent" | "%" => Ok(FormType::Percentage),
            "points" | "pts" => Ok(FormType::Points),
            other => Err(format!("unknown form type: {other}")),
        }
    }
}

/// The `[min, max]` percentage range an evaluation score is expected to land in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct ScoringBand {
    min: f64,
    max: f64,
}

impl ScoringBand {
    /// Build a band, rejecting bounds outside `[0, 100]` or `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, FormError> {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_range(min) || !in_range(max) || min > max {
            return Err(FormError::InvalidBand { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Midpoint of the band, used to pick the performance label.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl TryFrom<[f64; 2]> for ScoringBand {
    type Error = FormError;

    fn try_from([min, max]: [f64; 2]) -> Result<Self, Self::Error> {
        ScoringBand::new(min, max)
    }
}

impl From<ScoringBand> for [f64; 2] {
    fn from(band: ScoringBand) -> Self {
        [band.min, band.max]
    }
}

/// Discriminant of an [`Answer`], used by the answer-type gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    Range,
    Boolean,
    Comment,
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerKind::Range => write!(f, "range"),
            AnswerKind::Boolean => write!(f, "boolean"),
            AnswerKind::Comment => write!(f, "comment"),
        }
    }
}

impl FromStr for AnswerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "range" => Ok(AnswerKind::Range),
            "boolean" | "bool" | "radio" => Ok(AnswerKind::Boolean),
            "comment" | "textarea" => Ok(AnswerKind::Comment),
            other => Err(format!("unknown answer kind: {other}")),
        }
    }
}

/// One answer option offered by a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Answer {
    /// A labelled value the evaluator can pick.
    #[serde(rename_all = "camelCase")]
    Range {
        #[serde(default)]
        answer_text: String,
        #[serde(default)]
        answer_value: String,
    },
    /// A fixed True/False choice mapped to custom values.
    #[serde(rename_all = "camelCase")]
    Boolean {
        #[serde(default)]
        true_value: String,
        #[serde(default)]
        false_value: String,
    },
    /// Free text with no score value.
    Comment {
        #[serde(default)]
        text: String,
    },
}

impl Answer {
    /// An empty answer of the given kind, as the "add answer" buttons create.
    pub fn empty(kind: AnswerKind) -> Self {
        match kind {
            AnswerKind::Range => Answer::Range {
                answer_text: String::new(),
                answer_value: String::new(),
            },
            AnswerKind::Boolean => Answer::Boolean {
                true_value: String::new(),
                false_value: String::new(),
            },
            AnswerKind::Comment => Answer::Comment {
                text: String::new(),
            },
        }
    }

    pub fn kind(&self) -> AnswerKind {
        match self {
            Answer::Range { .. } => AnswerKind::Range,
            Answer::Boolean { .. } => AnswerKind::Boolean,
            Answer::Comment { .. } => AnswerKind::Comment,
        }
    }
}

/// A single question within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The question shown to the evaluator.
    pub text: String,
    /// Category this question belongs to; must be selected on the form.
    pub category: String,
    /// Share of the category's weight, in percent. Percentage forms only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_weight: Option<f64>,
    /// Weight of the question: a percentage or a number of points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_weight: Option<f64>,
    /// Answer options, in display order.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    /// The question auto-created when a category is selected or "add question"
    /// is pressed: placeholder text, one empty range answer, no weights.
    pub fn seed(category: &str) -> Self {
        Self {
            text: format!("Question for {category}"),
            category: category.to_string(),
            category_weight: None,
            question_weight: None,
            answers: vec![Answer::empty(AnswerKind::Range)],
        }
    }

    pub fn has_answer_kind(&self, kind: AnswerKind) -> bool {
        self.answers.iter().any(|a| a.kind() == kind)
    }

    pub fn count_answer_kind(&self, kind: AnswerKind) -> usize {
        self.answers.iter().filter(|a| a.kind() == kind).count()
    }
}

/// An evaluation form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationForm {
    /// Human-readable form name. Required.
    #[serde(default)]
    pub form_name: String,
    /// Optional description.
    #[serde(default)]
    pub form_description: String,
    /// Whether a finished evaluation needs supervisor approval.
    #[serde(default)]
    pub approval_required: bool,
    /// How the evaluated agent may respond.
    #[serde(default)]
    pub agent_response_option: AgentResponseOption,
    /// Percentage or points scoring.
    #[serde(default, rename = "formTypeOption")]
    pub form_type: FormType,
    /// Selected categories, in selection order.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Single severity tag describing call complexity.
    #[serde(default)]
    pub severity: String,
    /// All questions, flat; grouping by category is a view.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Expected score range.
    #[serde(default)]
    pub scoring_band: ScoringBand,
    /// Whether the form can be used for new evaluations.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EvaluationForm {
    fn default() -> Self {
        Self {
            form_name: String::new(),
            form_description: String::new(),
            approval_required: false,
            agent_response_option: AgentResponseOption::default(),
            form_type: FormType::default(),
            categories: Vec::new(),
            severity: String::new(),
            questions: Vec::new(),
            scoring_band: ScoringBand::default(),
            active: true,
        }
    }
}

impl EvaluationForm {
    /// Iterate the questions of one category together with their global index.
    pub fn questions_in<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Question)> + 'a {
        self.questions
            .iter()
            .enumerate()
            .filter(move |(_, q)| q.category == category)
    }

    /// Sum of the category weights currently set in `category`.
    pub fn category_weight_total(&self, category: &str) -> f64 {
        self.questions_in(category)
            .filter_map(|(_, q)| q.category_weight)
            .sum()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Questions may be added and shown only once categories and severity are set.
    pub fn questions_unlocked(&self) -> bool {
        !self.categories.is_empty() && !self.severity.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_type_display_and_parse() {
        assert_eq!(FormType::Percentage.to_string(), "percentage");
        assert_eq!("Points".parse::<FormType>().unwrap(), FormType::Points);
        assert_eq!("%".parse::<FormType>().unwrap(), FormType::Percentage);
        assert!("grades".parse::<FormType>().is_err());
    }

    #[test]
    fn agent_response_parse() {
        assert_eq!(
            "allowAcknowledgeAndAppeal"
                .parse::<AgentResponseOption>()
                .unwrap(),
            AgentResponseOption::AllowAcknowledgeAndAppeal
        );
        assert_eq!(
            AgentResponseOption::AllowAcknowledge.to_string(),
            "allowAcknowledge"
        );
    }

    #[test]
    fn scoring_band_bounds() {
        assert!(ScoringBand::new(80.0, 90.0).is_ok());
        assert!(ScoringBand::new(90.0, 80.0).is_err());
        assert!(ScoringBand::new(-1.0, 10.0).is_err());
        assert!(ScoringBand::new(0.0, 100.1).is_err());
        assert_eq!(ScoringBand::new(80.0, 90.0).unwrap().midpoint(), 85.0);
    }

    #[test]
    fn scoring_band_rejects_bad_payload() {
        let err = serde_json::from_str::<ScoringBand>("[70, 20]");
        assert!(err.is_err());
        let band: ScoringBand = serde_json::from_str("[20, 70]").unwrap();
        assert_eq!(band.max(), 70.0);
    }

    #[test]
    fn seed_question_has_one_empty_range_answer() {
        let q = Question::seed("IT");
        assert_eq!(q.text, "Question for IT");
        assert_eq!(q.answers, vec![Answer::empty(AnswerKind::Range)]);
        assert!(q.category_weight.is_none());
        assert!(q.question_weight.is_none());
    }

    #[test]
    fn answer_payload_is_tagged() {
        let answer = Answer::Boolean {
            true_value: "10".into(),
            false_value: "0".into(),
        };
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["type"], "boolean");
        assert_eq!(json["trueValue"], "10");
        assert!(json.get("answerText").is_none());
    }

    #[test]
    fn form_payload_uses_camel_case_keys() {
        let form = EvaluationForm {
            form_name: "Call QA".into(),
            categories: vec!["IT".into()],
            severity: "Support".into(),
            questions: vec![Question::seed("IT")],
            ..Default::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["formName"], "Call QA");
        assert_eq!(json["formTypeOption"], "percentage");
        assert_eq!(json["agentResponseOption"], "noResponse");
        assert_eq!(json["scoringBand"], serde_json::json!([0.0, 0.0]));
        assert!(json["questions"][0].get("categoryWeight").is_none());
    }

    #[test]
    fn category_weight_total_ignores_other_categories() {
        let mut form = EvaluationForm {
            categories: vec!["IT".into(), "HR".into()],
            ..Default::default()
        };
        let rows = [
            ("IT", Some(30.0)),
            ("HR", Some(50.0)),
            ("IT", None),
            ("IT", Some(20.0)),
        ];
        for (cat, w) in rows {
            let mut q = Question::seed(cat);
            q.category_weight = w;
            form.questions.push(q);
        }
        assert_eq!(form.category_weight_total("IT"), 50.0);
        assert_eq!(form.category_weight_total("HR"), 50.0);
        assert_eq!(form.questions_in("IT").map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 2, 3]);
    }
}
