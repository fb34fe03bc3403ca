//! Editing session and submission control.
//!
//! A [`FormSession`] owns the value map and error map for one editing pass
//! over one form. Submission re-validates every visible field; a clean pass
//! hands the value map to the injected [`FormSink`] collaborator and nothing
//! more: the engine tracks no async outcome, no retry, no rollback. Saving a
//! draft has no validation gate at all.

use std::collections::BTreeMap;

use anyhow::Result;

use form_model::{FieldValue, FormValues, ValidationReport};
use form_validate::{CompiledForm, is_visible, validate_field, validate_form};

use crate::plan::RenderPlan;

/// Submission controller state. `Submitting` lasts only for the duration of
/// the sink call; the session always returns to `Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Editing,
    Submitting,
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation passed and the sink was invoked.
    Submitted,
    /// Validation failed; the sink was not invoked and the session's error
    /// map now holds the failures.
    Rejected(ValidationReport),
}

/// Injected collaborator receiving the value map on submit and draft save.
///
/// Sink errors propagate to the caller unwrapped; any toast, retry, or
/// loading-flag handling belongs on the caller's side of this seam.
pub trait FormSink {
    fn submit(&mut self, values: &FormValues) -> Result<()>;

    fn save_draft(&mut self, values: &FormValues) -> Result<()> {
        let _ = values;
        Ok(())
    }
}

/// One editing session over one compiled form.
#[derive(Debug)]
pub struct FormSession {
    compiled: CompiledForm,
    values: FormValues,
    errors: BTreeMap<String, String>,
    state: SessionState,
}

impl FormSession {
    pub fn new(compiled: CompiledForm) -> Self {
        Self {
            compiled,
            values: FormValues::new(),
            errors: BTreeMap::new(),
            state: SessionState::Editing,
        }
    }

    /// Start from pre-populated values (e.g. a saved draft).
    #[must_use]
    pub fn with_values(mut self, values: FormValues) -> Self {
        self.values = values;
        self
    }

    pub fn compiled(&self) -> &CompiledForm {
        &self.compiled
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Write one field's value and optimistically clear its recorded error.
    /// The field is not re-validated until the next submit or an explicit
    /// [`FormSession::revalidate_field`] call.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        self.errors.remove(&name);
        self.values.insert(name, value.into());
    }

    /// Validate-on-change, for callers that opt in: re-runs the one field's
    /// rules (if it is currently visible) and updates its error entry.
    pub fn revalidate_field(&mut self, name: &str) {
        let visible = self
            .compiled
            .form()
            .field_by_name(name)
            .is_some_and(|field| is_visible(field, &self.values));
        let issue = if visible {
            validate_field(&self.compiled, name, &self.values)
        } else {
            None
        };
        match issue {
            Some(issue) => {
                self.errors.insert(name.to_string(), issue.message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    /// Current render plan for this session.
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan::build(&self.compiled, &self.values, &self.errors)
    }

    /// Submit the form.
    ///
    /// Runs whole-form validation first. On failure the session stays in
    /// `Editing`, the error map is replaced wholesale, and the sink is never
    /// invoked. On success the session passes through `Submitting` for the
    /// sink call and returns the sink's own result.
    pub fn submit(&mut self, sink: &mut dyn FormSink) -> Result<SubmitOutcome> {
        let report = validate_form(&self.compiled, &self.values);
        if report.has_errors() {
            self.errors = report.errors_by_field();
            return Ok(SubmitOutcome::Rejected(report));
        }
        self.errors.clear();
        self.state = SessionState::Submitting;
        let result = sink.submit(&self.values);
        self.state = SessionState::Editing;
        result.map(|()| SubmitOutcome::Submitted)
    }

    /// Save a draft. No validation gate; the sink receives the values as-is.
    pub fn save_draft(&mut self, sink: &mut dyn FormSink) -> Result<()> {
        sink.save_draft(&self.values)
    }
}
