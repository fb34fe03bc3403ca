use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A single issue found while validating form values or checking metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Rule identifier (e.g. "required", "minLength") or check name.
    pub rule: String,
    /// Human-readable message describing the issue.
    pub message: String,
    /// Severity level.
    pub severity: IssueSeverity,
    /// Field name the issue is keyed under (None for form-level issues).
    pub field: Option<String>,
}

impl ValidationIssue {
    pub fn error(
        rule: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            severity: IssueSeverity::Error,
            field: Some(field.into()),
        }
    }

    pub fn warning(
        rule: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            severity: IssueSeverity::Warning,
            field: Some(field.into()),
        }
    }
}

/// Validation report for one form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(rename = "form")]
    pub form_id: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            issues: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Error messages keyed by field name, the shape the rendering session
    /// stores between validation passes. First error per field wins.
    pub fn errors_by_field(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for issue in &self.issues {
            if issue.severity != IssueSeverity::Error {
                continue;
            }
            if let Some(field) = &issue.field {
                errors
                    .entry(field.clone())
                    .or_insert_with(|| issue.message.clone());
            }
        }
        errors
    }
}
