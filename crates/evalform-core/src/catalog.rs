//! In-memory catalog of saved forms.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::FormError;
use crate::model::EvaluationForm;

/// One row of the catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub id: u32,
    pub form_name: String,
    pub categories: Vec<String>,
    pub severity: String,
    pub questions_count: usize,
    pub active: bool,
}

/// Saved forms keyed by numeric id. Ids are never reused while a higher
/// id exists: new entries get `max id + 1`.
#[derive(Debug, Clone, Default)]
pub struct FormCatalog {
    forms: BTreeMap<u32, EvaluationForm>,
}

impl FormCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u32 {
        self.forms.keys().next_back().map_or(1, |id| id + 1)
    }

    /// Store a new form and return its id.
    pub fn add(&mut self, form: EvaluationForm) -> u32 {
        let id = self.next_id();
        tracing::debug!(id, name = %form.form_name, "added form to catalog");
        self.forms.insert(id, form);
        id
    }

    /// Replace the form stored under `id`.
    pub fn update(&mut self, id: u32, form: EvaluationForm) -> Result<(), FormError> {
        let slot = self.forms.get_mut(&id).ok_or(FormError::UnknownForm(id))?;
        *slot = form;
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<EvaluationForm, FormError> {
        self.forms.remove(&id).ok_or(FormError::UnknownForm(id))
    }

    /// Duplicate a form under a fresh id. The name is kept as is.
    pub fn copy(&mut self, id: u32) -> Result<u32, FormError> {
        let form = self.get(id)?.clone();
        Ok(self.add(form))
    }

    pub fn get(&self, id: u32) -> Result<&EvaluationForm, FormError> {
        self.forms.get(&id).ok_or(FormError::UnknownForm(id))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Summary rows in id order.
    pub fn list(&self) -> Vec<CatalogSummary> {
        self.forms
            .iter()
            .map(|(&id, form)| CatalogSummary {
                id,
                form_name: form.form_name.clone(),
                categories: form.categories.clone(),
                severity: form.severity.clone(),
                questions_count: form.questions.len(),
                active: form.active,
            })
            .collect()
    }
}

impl FromIterator<EvaluationForm> for FormCatalog {
    fn from_iter<I: IntoIterator<Item = EvaluationForm>>(iter: I) -> Self {
        let mut catalog = FormCatalog::new();
        for form in iter {
            catalog.add(form);
        }
        catalog
    }
}
