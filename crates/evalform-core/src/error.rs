//! Form builder error types.
//!
//! These errors represent misuse of the builder: addressing a question that
//! does not exist, editing weights that the form type does not carry, or
//! adding questions before the category/severity selection is complete.
//! Advisory conditions such as an over-weighted category are not errors;
//! they surface as [`crate::validation::WeightWarning`] instead.

use thiserror::Error;

use crate::model::AnswerKind;

/// Errors that can occur while building or editing an evaluation form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// No question exists at the given global index.
    #[error("no question at index {index} (form has {len} questions)")]
    QuestionIndex { index: usize, len: usize },

    /// No answer exists at the given index within a question.
    #[error("question {question} has no answer at index {index}")]
    AnswerIndex { question: usize, index: usize },

    /// An answer edit tried to change the answer's kind.
    #[error("answer {index} of question {question} is a {expected} answer, not {found}")]
    AnswerKindMismatch {
        question: usize,
        index: usize,
        expected: AnswerKind,
        found: AnswerKind,
    },

    /// A question mixes boolean and range answers, or has several booleans.
    #[error("question {0} mixes boolean answers with range answers or other booleans")]
    MixedAnswers(usize),

    /// The category is not part of the form's selected categories.
    #[error("category not selected: {0}")]
    CategoryNotSelected(String),

    /// The same category was selected twice.
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    /// Questions cannot be added until categories and severity are chosen.
    #[error("select at least one category and a severity before adding questions")]
    QuestionsLocked,

    /// A weight value was negative, above 100, or not a number.
    #[error("invalid weight {value}: must be between 0 and 100")]
    InvalidWeight { value: f64 },

    /// Category weights only exist on percentage forms.
    #[error("category weights are only available on percentage forms")]
    CategoryWeightUnavailable,

    /// The value is not one of the configured selection options.
    #[error("unknown {kind} option: {value}")]
    UnknownOption { kind: &'static str, value: String },

    /// The scoring band is outside [0, 100] or inverted.
    #[error("invalid scoring band [{min}, {max}]")]
    InvalidBand { min: f64, max: f64 },

    /// No catalog entry with this id.
    #[error("no form with id {0}")]
    UnknownForm(u32),
}
