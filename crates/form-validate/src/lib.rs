//! Validation engine for Barakatna form definitions.
//!
//! The engine interprets declarative [`form_model::FormMetadata`] against a
//! flat value map: conditional visibility gates which fields participate,
//! each field's rules run in declared order with first-failure-wins, and the
//! whole-form pass produces a [`ValidationReport`] keyed by field name.

mod checks;
mod compile;
mod rules;
mod visibility;

pub use checks::check_form;
pub use compile::CompiledForm;
pub use visibility::is_visible;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use form_model::{FormValues, ValidationIssue, ValidationReport};

/// Validate a single field against the current values.
///
/// Rules run in declared order; the first failing rule's message wins and
/// later rules are not evaluated. A rule whose compiled condition evaluates
/// false against the whole value map is skipped entirely.
///
/// Visibility is not consulted here; callers that want the whole-form
/// contract use [`validate_form`].
pub fn validate_field(
    compiled: &CompiledForm,
    name: &str,
    values: &FormValues,
) -> Option<ValidationIssue> {
    let field_index = compiled
        .form()
        .fields
        .iter()
        .position(|field| field.name == name)?;
    validate_field_at(compiled, field_index, values)
}

fn validate_field_at(
    compiled: &CompiledForm,
    field_index: usize,
    values: &FormValues,
) -> Option<ValidationIssue> {
    let field = compiled.field_at(field_index)?;
    for (rule_index, rule) in field.validation.iter().enumerate() {
        if let Some(condition) = compiled.rule_condition(field_index, rule_index)
            && !condition.eval(values)
        {
            continue;
        }
        let pattern = compiled.rule_pattern(field_index, rule_index);
        if let Some(message) = rules::apply_rule(field, rule, pattern, values) {
            return Some(ValidationIssue::error(
                rule.rule_type.as_str(),
                field.name.clone(),
                message,
            ));
        }
    }
    None
}

/// Validate every visible field of the form.
///
/// A field whose conditional is not satisfied is skipped entirely: it
/// contributes nothing to the report regardless of its own rules. Collapsed
/// sections do NOT exempt their fields; only conditional visibility does.
pub fn validate_form(compiled: &CompiledForm, values: &FormValues) -> ValidationReport {
    let mut report = ValidationReport::new(compiled.form().id.clone());
    for (field_index, field) in compiled.form().fields.iter().enumerate() {
        if !is_visible(field, values) {
            continue;
        }
        if let Some(issue) = validate_field_at(compiled, field_index, values) {
            report.issues.push(issue);
        }
    }
    report
}

#[derive(Debug, Serialize)]
pub struct ValidationReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub form: String,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: Vec<ValidationIssue>,
}

const REPORT_SCHEMA: &str = "barakatna.form-validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Build the versioned report payload written by the CLI.
pub fn report_payload(report: &ValidationReport) -> ValidationReportPayload {
    ValidationReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        form: report.form_id.clone(),
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        issues: report.issues.clone(),
    }
}

/// Write a validation report as JSON under `output_dir`.
pub fn write_validation_report_json(
    output_dir: &Path,
    report: &ValidationReport,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join("validation_report.json");
    let payload = report_payload(report);
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
