//! Form builder state.
//!
//! [`FormStore`] owns a single [`EvaluationForm`] and applies [`FormAction`]s
//! to it. Each action goes through a pure update function in [`ops`] that
//! takes the current form and returns the next one, so the store only swaps
//! whole states and tracks the advisory weight warnings on the side.
//!
//! Questions are addressed by their global index in the flat question list.
//! Grouping by category is derived on demand by [`FormStore::grouped_questions`]
//! and never cached, so indices stay correct after removals.

use serde::{Deserialize, Serialize};

use crate::config::SelectionOptions;
use crate::error::FormError;
use crate::model::{
    AgentResponseOption, Answer, AnswerKind, EvaluationForm, FormType, Question, ScoringBand,
};
use crate::validation::{self, AnswerGate, WeightWarning};

/// A single builder event.
///
/// In scripts the variant is selected by a `type` key, e.g.
/// `{ type = "add_question", category = "IT" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormAction {
    SetName {
        name: String,
    },
    SetDescription {
        description: String,
    },
    SetApprovalRequired {
        required: bool,
    },
    SetAgentResponse {
        option: AgentResponseOption,
    },
    ChangeFormType {
        form_type: FormType,
    },
    SetScoringBand {
        min: f64,
        max: f64,
    },
    SetActive {
        active: bool,
    },
    SelectCategories {
        categories: Vec<String>,
    },
    SelectSeverity {
        severity: String,
    },
    AddQuestion {
        category: String,
    },
    RemoveQuestion {
        index: usize,
    },
    UpdateQuestion {
        index: usize,
        question: Question,
    },
    SetQuestionText {
        index: usize,
        text: String,
    },
    SetCategoryWeight {
        index: usize,
        #[serde(default)]
        weight: Option<f64>,
    },
    SetQuestionWeight {
        index: usize,
        #[serde(default)]
        weight: Option<f64>,
    },
    AddAnswer {
        index: usize,
        kind: AnswerKind,
    },
    RemoveAnswer {
        index: usize,
        answer: usize,
    },
    UpdateAnswer {
        index: usize,
        answer: usize,
        value: Answer,
    },
}

/// What applying an action did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    /// False when the action was a no-op, e.g. a disabled "add answer".
    pub changed: bool,
    /// Set when a category weight edit leaves its category over 100%.
    pub warning: Option<WeightWarning>,
}

/// Questions of one category, with their global indices.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub questions: Vec<(usize, &'a Question)>,
}

/// Single owner of the form being built.
#[derive(Debug, Clone)]
pub struct FormStore {
    form: EvaluationForm,
    options: SelectionOptions,
    warnings: Vec<WeightWarning>,
}

impl FormStore {
    /// Open an empty form, as "Add Form" does.
    pub fn new(options: SelectionOptions) -> Self {
        Self::with_form(EvaluationForm::default(), options)
    }

    /// Open an existing form for editing.
    pub fn with_form(form: EvaluationForm, options: SelectionOptions) -> Self {
        let warnings = validation::weight_warnings(&form);
        Self {
            form,
            options,
            warnings,
        }
    }

    pub fn form(&self) -> &EvaluationForm {
        &self.form
    }

    pub fn into_form(self) -> EvaluationForm {
        self.form
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Current weight warnings, in category order.
    pub fn warnings(&self) -> &[WeightWarning] {
        &self.warnings
    }

    /// Discard all edits, as closing or cancelling the builder does.
    pub fn reset(&mut self) {
        self.form = EvaluationForm::default();
        self.warnings.clear();
    }

    /// Apply one action. On error the form is left untouched.
    ///
    /// Weight warnings are rebuilt from the resulting form after every
    /// action, changed or not.
    pub fn apply(&mut self, action: FormAction) -> Result<ActionOutcome, FormError> {
        let mut warning = None;

        if let FormAction::SetCategoryWeight { index, weight } = &action {
            self.question(*index)?;
            if let Some(value) = weight {
                warning = validation::check_category_weight(&self.form, *index, *value)?;
            } else if self.form.form_type != FormType::Percentage {
                return Err(FormError::CategoryWeightUnavailable);
            }
        }

        let next = ops::reduce(&self.form, &action, &self.options)?;
        let changed = next.is_some();
        if let Some(next) = next {
            self.form = next;
        }

        if let FormAction::UpdateQuestion { question, .. } = &action {
            if question.category_weight.is_some() {
                warning = self.category_warning(&question.category);
            }
        }

        self.warnings = validation::weight_warnings(&self.form);
        if let Some(w) = &warning {
            tracing::warn!("{w}");
        }

        if changed {
            tracing::debug!(?action, questions = self.form.questions.len(), "applied action");
        } else {
            tracing::debug!(?action, "action had no effect");
        }
        Ok(ActionOutcome { changed, warning })
    }

    /// Append a question to `category`.
    pub fn add_question(&mut self, category: &str) -> Result<ActionOutcome, FormError> {
        self.apply(FormAction::AddQuestion {
            category: category.to_string(),
        })
    }

    /// Remove the question at `index`; later questions shift down by one.
    pub fn remove_question(&mut self, index: usize) -> Result<ActionOutcome, FormError> {
        self.apply(FormAction::RemoveQuestion { index })
    }

    /// Replace the question at `index`.
    pub fn update_question(
        &mut self,
        index: usize,
        question: Question,
    ) -> Result<ActionOutcome, FormError> {
        self.apply(FormAction::UpdateQuestion { index, question })
    }

    pub fn select_categories<I, S>(&mut self, categories: I) -> Result<ActionOutcome, FormError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply(FormAction::SelectCategories {
            categories: categories.into_iter().map(Into::into).collect(),
        })
    }

    pub fn select_severity(&mut self, severity: &str) -> Result<ActionOutcome, FormError> {
        self.apply(FormAction::SelectSeverity {
            severity: severity.to_string(),
        })
    }

    pub fn set_category_weight(
        &mut self,
        index: usize,
        weight: Option<f64>,
    ) -> Result<ActionOutcome, FormError> {
        self.apply(FormAction::SetCategoryWeight { index, weight })
    }

    pub fn change_form_type(&mut self, form_type: FormType) -> Result<ActionOutcome, FormError> {
        self.apply(FormAction::ChangeFormType { form_type })
    }

    pub fn add_answer(
        &mut self,
        index: usize,
        kind: AnswerKind,
    ) -> Result<ActionOutcome, FormError> {
        self.apply(FormAction::AddAnswer { index, kind })
    }

    /// Which answer kinds can currently be added to question `index`.
    pub fn answer_gate(&self, index: usize) -> Result<AnswerGate, FormError> {
        Ok(validation::answer_gate(self.question(index)?))
    }

    /// Questions grouped by selected category, in selection order.
    ///
    /// Empty until both categories and a severity are selected.
    pub fn grouped_questions(&self) -> Vec<CategoryGroup<'_>> {
        if !self.form.questions_unlocked() {
            return Vec::new();
        }
        self.form
            .categories
            .iter()
            .map(|category| CategoryGroup {
                category: category.as_str(),
                questions: self.form.questions_in(category).collect(),
            })
            .collect()
    }

    fn question(&self, index: usize) -> Result<&Question, FormError> {
        self.form.questions.get(index).ok_or(FormError::QuestionIndex {
            index,
            len: self.form.questions.len(),
        })
    }

    /// The warning for `category` if its weights currently exceed 100%.
    fn category_warning(&self, category: &str) -> Option<WeightWarning> {
        if self.form.form_type != FormType::Percentage {
            return None;
        }
        let total = self.form.category_weight_total(category);
        (total > validation::MAX_PERCENT).then(|| WeightWarning {
            category: category.to_string(),
            total,
        })
    }
}

/// Pure update functions, one per action.
///
/// Each takes the current form and returns `Ok(Some(next))` for a change,
/// `Ok(None)` for a no-op, or an error that leaves the caller's form as is.
pub mod ops {
    use super::*;

    type Next = Result<Option<EvaluationForm>, FormError>;

    pub fn reduce(form: &EvaluationForm, action: &FormAction, options: &SelectionOptions) -> Next {
        match action {
            FormAction::SetName { name } => edit(form, |f| f.form_name = name.clone()),
            FormAction::SetDescription { description } => {
                edit(form, |f| f.form_description = description.clone())
            }
            FormAction::SetApprovalRequired { required } => {
                edit(form, |f| f.approval_required = *required)
            }
            FormAction::SetAgentResponse { option } => {
                edit(form, |f| f.agent_response_option = *option)
            }
            FormAction::SetActive { active } => edit(form, |f| f.active = *active),
            FormAction::SetScoringBand { min, max } => {
                let band = ScoringBand::new(*min, *max)?;
                edit(form, |f| f.scoring_band = band)
            }
            FormAction::ChangeFormType { form_type } => change_form_type(form, *form_type),
            FormAction::SelectCategories { categories } => {
                select_categories(form, categories, options)
            }
            FormAction::SelectSeverity { severity } => select_severity(form, severity, options),
            FormAction::AddQuestion { category } => add_question(form, category),
            FormAction::RemoveQuestion { index } => remove_question(form, *index),
            FormAction::UpdateQuestion { index, question } => {
                update_question(form, *index, question.clone())
            }
            FormAction::SetQuestionText { index, text } => {
                patch_question(form, *index, |q| q.text = text.clone())
            }
            FormAction::SetCategoryWeight { index, weight } => {
                set_category_weight(form, *index, *weight)
            }
            FormAction::SetQuestionWeight { index, weight } => {
                set_question_weight(form, *index, *weight)
            }
            FormAction::AddAnswer { index, kind } => add_answer(form, *index, *kind),
            FormAction::RemoveAnswer { index, answer } => remove_answer(form, *index, *answer),
            FormAction::UpdateAnswer {
                index,
                answer,
                value,
            } => update_answer(form, *index, *answer, value.clone()),
        }
    }

    fn edit(form: &EvaluationForm, f: impl FnOnce(&mut EvaluationForm)) -> Next {
        let mut next = form.clone();
        f(&mut next);
        Ok((next != *form).then_some(next))
    }

    fn check_index(form: &EvaluationForm, index: usize) -> Result<(), FormError> {
        if index < form.questions.len() {
            Ok(())
        } else {
            Err(FormError::QuestionIndex {
                index,
                len: form.questions.len(),
            })
        }
    }

    fn patch_question(
        form: &EvaluationForm,
        index: usize,
        f: impl FnOnce(&mut Question),
    ) -> Next {
        check_index(form, index)?;
        edit(form, |next| f(&mut next.questions[index]))
    }

    /// Switching type clears every question weight; category weights survive
    /// only on percentage forms.
    pub fn change_form_type(form: &EvaluationForm, form_type: FormType) -> Next {
        if form.form_type == form_type {
            return Ok(None);
        }
        edit(form, |next| {
            next.form_type = form_type;
            for q in &mut next.questions {
                q.question_weight = None;
                if form_type != FormType::Percentage {
                    q.category_weight = None;
                }
            }
        })
    }

    /// Replace the category selection, dropping questions of removed
    /// categories and seeding one question for each selected category that
    /// has none.
    pub fn select_categories(
        form: &EvaluationForm,
        categories: &[String],
        options: &SelectionOptions,
    ) -> Next {
        for (i, category) in categories.iter().enumerate() {
            if categories[..i].contains(category) {
                return Err(FormError::DuplicateCategory(category.clone()));
            }
            if !options.allows_category(category) {
                return Err(FormError::UnknownOption {
                    kind: "category",
                    value: category.clone(),
                });
            }
        }

        edit(form, |next| {
            next.categories = categories.to_vec();
            next.questions.retain(|q| categories.contains(&q.category));
            for category in categories {
                if !next.questions.iter().any(|q| &q.category == category) {
                    next.questions.push(Question::seed(category));
                }
            }
        })
    }

    pub fn select_severity(
        form: &EvaluationForm,
        severity: &str,
        options: &SelectionOptions,
    ) -> Next {
        if !severity.is_empty() && !options.allows_severity(severity) {
            return Err(FormError::UnknownOption {
                kind: "severity",
                value: severity.to_string(),
            });
        }
        edit(form, |next| next.severity = severity.to_string())
    }

    pub fn add_question(form: &EvaluationForm, category: &str) -> Next {
        if !form.questions_unlocked() {
            return Err(FormError::QuestionsLocked);
        }
        if !form.has_category(category) {
            return Err(FormError::CategoryNotSelected(category.to_string()));
        }
        edit(form, |next| next.questions.push(Question::seed(category)))
    }

    pub fn remove_question(form: &EvaluationForm, index: usize) -> Next {
        check_index(form, index)?;
        edit(form, |next| {
            next.questions.remove(index);
        })
    }

    /// Replace a question wholesale. The replacement must stay in a selected
    /// category and keep its answers consistent.
    pub fn update_question(form: &EvaluationForm, index: usize, question: Question) -> Next {
        check_index(form, index)?;
        if !form.has_category(&question.category) {
            return Err(FormError::CategoryNotSelected(question.category));
        }
        let booleans = question.count_answer_kind(AnswerKind::Boolean);
        if booleans > 1 || (booleans == 1 && question.has_answer_kind(AnswerKind::Range)) {
            return Err(FormError::MixedAnswers(index));
        }
        if let Some(weight) = question.category_weight {
            if form.form_type != FormType::Percentage {
                return Err(FormError::CategoryWeightUnavailable);
            }
            validation::validate_percent(weight)?;
        }
        if let Some(weight) = question.question_weight {
            validation::validate_question_weight(form.form_type, weight)?;
        }
        edit(form, |next| next.questions[index] = question)
    }

    pub fn set_category_weight(form: &EvaluationForm, index: usize, weight: Option<f64>) -> Next {
        if form.form_type != FormType::Percentage {
            return Err(FormError::CategoryWeightUnavailable);
        }
        if let Some(value) = weight {
            validation::validate_percent(value)?;
        }
        patch_question(form, index, |q| q.category_weight = weight)
    }

    pub fn set_question_weight(form: &EvaluationForm, index: usize, weight: Option<f64>) -> Next {
        if let Some(value) = weight {
            validation::validate_question_weight(form.form_type, value)?;
        }
        patch_question(form, index, |q| q.question_weight = weight)
    }

    /// Append an empty answer of `kind`, or do nothing if the gate forbids it.
    pub fn add_answer(form: &EvaluationForm, index: usize, kind: AnswerKind) -> Next {
        check_index(form, index)?;
        if !validation::answer_gate(&form.questions[index]).allows(kind) {
            return Ok(None);
        }
        patch_question(form, index, |q| q.answers.push(Answer::empty(kind)))
    }

    pub fn remove_answer(form: &EvaluationForm, index: usize, answer: usize) -> Next {
        check_index(form, index)?;
        if answer >= form.questions[index].answers.len() {
            return Err(FormError::AnswerIndex {
                question: index,
                index: answer,
            });
        }
        patch_question(form, index, |q| {
            q.answers.remove(answer);
        })
    }

    /// Edit an answer's fields. The answer keeps its kind.
    pub fn update_answer(
        form: &EvaluationForm,
        index: usize,
        answer: usize,
        value: Answer,
    ) -> Next {
        check_index(form, index)?;
        let existing = form.questions[index]
            .answers
            .get(answer)
            .ok_or(FormError::AnswerIndex {
                question: index,
                index: answer,
            })?;
        if existing.kind() != value.kind() {
            return Err(FormError::AnswerKindMismatch {
                question: index,
                index: answer,
                expected: existing.kind(),
                found: value.kind(),
            });
        }
        patch_question(form, index, |q| q.answers[answer] = value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked(categories: &[&str]) -> FormStore {
        let mut store = FormStore::new(SelectionOptions::default());
        store.select_categories(categories.iter().copied()).unwrap();
        store.select_severity("Development").unwrap();
        store
    }

    #[test]
    fn selecting_two_categories_seeds_one_question_each() {
        let store = unlocked(&["IT", "HR"]);
        let form = store.form();
        assert_eq!(form.questions.len(), 2);
        assert_eq!(form.questions[0].category, "IT");
        assert_eq!(form.questions[1].category, "HR");
        for q in &form.questions {
            assert_eq!(q.answers, vec![Answer::empty(AnswerKind::Range)]);
        }
    }

    #[test]
    fn adding_a_category_seeds_only_that_category() {
        let mut store = unlocked(&["IT"]);
        store.add_question("IT").unwrap();
        store.select_categories(["IT", "Finance"]).unwrap();

        let form = store.form();
        assert_eq!(form.questions_in("IT").count(), 2);
        assert_eq!(form.questions_in("Finance").count(), 1);
    }

    #[test]
    fn removing_a_category_cascades_to_its_questions_only() {
        let mut store = unlocked(&["IT", "HR"]);
        store.add_question("HR").unwrap();
        store.add_question("IT").unwrap();
        store.select_categories(["IT"]).unwrap();

        let form = store.form();
        assert_eq!(form.questions.len(), 2);
        assert!(form.questions.iter().all(|q| q.category == "IT"));
    }

    #[test]
    fn seeding_happens_before_severity_but_list_stays_hidden() {
        let mut store = FormStore::new(SelectionOptions::default());
        store.select_categories(["IT"]).unwrap();
        assert_eq!(store.form().questions.len(), 1);
        assert!(store.grouped_questions().is_empty());
        assert_eq!(store.add_question("IT"), Err(FormError::QuestionsLocked));

        store.select_severity("Support").unwrap();
        assert_eq!(store.grouped_questions().len(), 1);
        assert!(store.add_question("IT").unwrap().changed);
    }

    #[test]
    fn add_question_requires_selected_category() {
        let mut store = unlocked(&["IT"]);
        assert_eq!(
            store.add_question("HR"),
            Err(FormError::CategoryNotSelected("HR".into()))
        );
    }

    #[test]
    fn unknown_and_duplicate_categories_are_rejected() {
        let mut store = FormStore::new(SelectionOptions::default());
        assert!(matches!(
            store.select_categories(["Legal"]),
            Err(FormError::UnknownOption { kind: "category", .. })
        ));
        assert_eq!(
            store.select_categories(["IT", "IT"]),
            Err(FormError::DuplicateCategory("IT".into()))
        );
        assert!(store.form().categories.is_empty());
    }

    #[test]
    fn grouped_indices_are_rederived_after_removal() {
        let mut store = unlocked(&["IT", "HR"]);
        store.add_question("IT").unwrap(); // index 2
        store.remove_question(0).unwrap();

        let groups = store.grouped_questions();
        let it: Vec<usize> = groups[0].questions.iter().map(|(i, _)| *i).collect();
        let hr: Vec<usize> = groups[1].questions.iter().map(|(i, _)| *i).collect();
        assert_eq!(it, vec![1]);
        assert_eq!(hr, vec![0]);
    }

    #[test]
    fn remove_out_of_range_is_an_error() {
        let mut store = unlocked(&["IT"]);
        assert_eq!(
            store.remove_question(3),
            Err(FormError::QuestionIndex { index: 3, len: 1 })
        );
    }

    #[test]
    fn running_category_sum_flags_exactly_overflowing_edits() {
        let mut store = unlocked(&["IT"]);
        store.add_question("IT").unwrap();
        store.add_question("IT").unwrap();

        let edits = [
            (0, 40.0),
            (1, 40.0),
            (2, 30.0),
            (2, 20.0),
            (0, 60.0),
            (0, 60.0),
            (1, 0.0),
        ];
        let flagged: Vec<Option<f64>> = edits
            .iter()
            .map(|&(i, w)| {
                store
                    .set_category_weight(i, Some(w))
                    .unwrap()
                    .warning
                    .map(|w| w.total)
            })
            .collect();

        assert_eq!(
            flagged,
            vec![None, None, Some(110.0), None, Some(120.0), Some(120.0), None]
        );
        assert!(store.warnings().is_empty());
    }

    #[test]
    fn overflowing_weight_is_still_saved() {
        let mut store = unlocked(&["HR"]);
        store.add_question("HR").unwrap();
        store.set_category_weight(0, Some(70.0)).unwrap();
        let outcome = store.set_category_weight(1, Some(50.0)).unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.warning.as_ref().map(|w| w.category.as_str()), Some("HR"));
        assert_eq!(store.form().questions[1].category_weight, Some(50.0));
        assert_eq!(store.warnings().len(), 1);
    }

    #[test]
    fn replacing_a_question_checks_its_category_weight() {
        let mut store = unlocked(&["IT"]);
        store.add_question("IT").unwrap();
        store.set_category_weight(0, Some(70.0)).unwrap();

        let mut q = store.form().questions[1].clone();
        q.category_weight = Some(50.0);
        let outcome = store.update_question(1, q).unwrap();

        let warning = outcome.warning.unwrap();
        assert_eq!(warning.category, "IT");
        assert_eq!(warning.total, 120.0);
        assert_eq!(store.warnings(), &[warning]);
    }

    #[test]
    fn moving_a_weighted_question_warns_for_the_new_category() {
        let mut store = unlocked(&["IT", "HR"]);
        store.set_category_weight(0, Some(60.0)).unwrap();
        store.set_category_weight(1, Some(80.0)).unwrap();

        let mut moved = store.form().questions[0].clone();
        moved.category = "HR".into();
        let outcome = store.update_question(0, moved).unwrap();

        assert_eq!(outcome.warning.map(|w| w.total), Some(140.0));
        assert_eq!(store.warnings().len(), 1);
        assert_eq!(store.warnings()[0].category, "HR");
    }

    #[test]
    fn repeating_an_overflowing_weight_still_warns() {
        let mut store = unlocked(&["IT"]);
        store.add_question("IT").unwrap();
        store.set_category_weight(0, Some(60.0)).unwrap();
        assert!(store.set_category_weight(1, Some(60.0)).unwrap().warning.is_some());

        let again = store.set_category_weight(1, Some(60.0)).unwrap();
        assert!(!again.changed);
        assert_eq!(again.warning.map(|w| w.total), Some(120.0));
        assert_eq!(store.warnings().len(), 1);
    }

    #[test]
    fn removing_a_question_clears_stale_warning() {
        let mut store = unlocked(&["HR"]);
        store.add_question("HR").unwrap();
        store.set_category_weight(0, Some(70.0)).unwrap();
        store.set_category_weight(1, Some(50.0)).unwrap();
        store.remove_question(1).unwrap();
        assert!(store.warnings().is_empty());
    }

    #[test]
    fn out_of_range_weight_leaves_form_untouched() {
        let mut store = unlocked(&["IT"]);
        let before = store.form().clone();
        assert!(store.set_category_weight(0, Some(150.0)).is_err());
        assert!(store.set_category_weight(0, Some(-1.0)).is_err());
        assert_eq!(store.form(), &before);
    }

    #[test]
    fn boolean_and_range_answers_exclude_each_other() {
        let mut store = unlocked(&["IT"]);

        // Seed question has a range answer, so boolean is a no-op.
        let outcome = store.add_answer(0, AnswerKind::Boolean).unwrap();
        assert!(!outcome.changed);
        assert_eq!(store.form().questions[0].answers.len(), 1);

        store
            .apply(FormAction::RemoveAnswer { index: 0, answer: 0 })
            .unwrap();
        assert!(store.add_answer(0, AnswerKind::Boolean).unwrap().changed);
        assert!(!store.add_answer(0, AnswerKind::Range).unwrap().changed);
        assert!(!store.add_answer(0, AnswerKind::Boolean).unwrap().changed);
        assert!(store.add_answer(0, AnswerKind::Comment).unwrap().changed);

        let kinds: Vec<AnswerKind> = store.form().questions[0]
            .answers
            .iter()
            .map(Answer::kind)
            .collect();
        assert_eq!(kinds, vec![AnswerKind::Boolean, AnswerKind::Comment]);
        assert!(!store.answer_gate(0).unwrap().range);
    }

    #[test]
    fn switching_to_points_clears_all_weights() {
        let mut store = unlocked(&["IT", "HR"]);
        store.set_category_weight(0, Some(60.0)).unwrap();
        store
            .apply(FormAction::SetQuestionWeight { index: 1, weight: Some(15.0) })
            .unwrap();

        store.change_form_type(FormType::Points).unwrap();
        for q in &store.form().questions {
            assert!(q.category_weight.is_none());
            assert!(q.question_weight.is_none());
        }
        assert_eq!(
            store.set_category_weight(0, Some(10.0)),
            Err(FormError::CategoryWeightUnavailable)
        );
    }

    #[test]
    fn switching_back_to_percentage_keeps_category_weights() {
        let mut form = EvaluationForm {
            form_type: FormType::Points,
            categories: vec!["IT".into()],
            severity: "Support".into(),
            questions: vec![Question::seed("IT")],
            ..Default::default()
        };
        form.questions[0].question_weight = Some(12.0);
        let next = ops::change_form_type(&form, FormType::Percentage)
            .unwrap()
            .unwrap();
        assert!(next.questions[0].question_weight.is_none());

        let mut pct = next.clone();
        pct.questions[0].category_weight = Some(30.0);
        pct.questions[0].question_weight = Some(5.0);
        pct.form_type = FormType::Points;
        let back = ops::change_form_type(&pct, FormType::Percentage).unwrap().unwrap();
        assert_eq!(back.questions[0].category_weight, Some(30.0));
        assert!(back.questions[0].question_weight.is_none());
    }

    #[test]
    fn same_form_type_is_a_no_op() {
        let mut store = unlocked(&["IT"]);
        store
            .apply(FormAction::SetQuestionWeight { index: 0, weight: Some(10.0) })
            .unwrap();
        let outcome = store.change_form_type(FormType::Percentage).unwrap();
        assert!(!outcome.changed);
        assert_eq!(store.form().questions[0].question_weight, Some(10.0));
    }

    #[test]
    fn update_question_is_an_immutable_replace() {
        let mut store = unlocked(&["IT"]);
        let before = store.form().clone();
        let mut q = before.questions[0].clone();
        q.text = "Did the agent greet the caller?".into();
        store.update_question(0, q.clone()).unwrap();

        assert_eq!(store.form().questions[0], q);
        assert_eq!(before.questions[0].text, "Question for IT");
    }

    #[test]
    fn update_question_rejects_mixed_answers() {
        let mut store = unlocked(&["IT"]);
        let mut q = store.form().questions[0].clone();
        q.answers.push(Answer::empty(AnswerKind::Boolean));
        assert_eq!(store.update_question(0, q), Err(FormError::MixedAnswers(0)));
    }

    #[test]
    fn update_answer_keeps_kind() {
        let mut store = unlocked(&["IT"]);
        let ok = store.apply(FormAction::UpdateAnswer {
            index: 0,
            answer: 0,
            value: Answer::Range {
                answer_text: "Excellent".into(),
                answer_value: "5".into(),
            },
        });
        assert!(ok.unwrap().changed);

        let err = store.apply(FormAction::UpdateAnswer {
            index: 0,
            answer: 0,
            value: Answer::empty(AnswerKind::Comment),
        });
        assert!(matches!(err, Err(FormError::AnswerKindMismatch { .. })));
    }

    #[test]
    fn reset_discards_everything() {
        let mut store = unlocked(&["IT"]);
        store
            .apply(FormAction::SetName { name: "QA".into() })
            .unwrap();
        store.reset();
        assert_eq!(store.form(), &EvaluationForm::default());
    }

    #[test]
    fn actions_deserialize_from_tagged_tables() {
        let action: FormAction =
            toml::from_str("type = \"set_category_weight\"\nindex = 2\nweight = 40.0").unwrap();
        assert_eq!(
            action,
            FormAction::SetCategoryWeight {
                index: 2,
                weight: Some(40.0)
            }
        );
        let cleared: FormAction =
            toml::from_str("type = \"set_category_weight\"\nindex = 0").unwrap();
        assert_eq!(cleared, FormAction::SetCategoryWeight { index: 0, weight: None });
    }
}
