//! evalform-core: evaluation-form model, builder state, and validation.
//!
//! This crate defines the form data model, the single-owner form store that
//! applies builder actions, and the validation rules that the CLI and report
//! crates build on.

pub mod band;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod store;
pub mod traits;
pub mod validation;

pub use error::FormError;
pub use model::{Answer, AnswerKind, EvaluationForm, FormType, Question};
pub use store::{ActionOutcome, FormAction, FormStore};
