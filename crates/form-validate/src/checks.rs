//! Metadata integrity checks.
//!
//! The authoring format does not enforce referential integrity: a field can
//! point at a section that does not exist, and a conditional or rule
//! condition can reference a field name that was renamed away. These checks
//! report such problems without blocking evaluation; dangling references
//! degrade to "value absent" at runtime.

use std::collections::BTreeSet;

use form_expr::Expr;
use form_model::{FieldType, FieldValue, FormMetadata, RuleType, ValidationIssue};

/// Check a form definition for integrity problems.
///
/// Dangling section references are errors (the field can never render);
/// everything else is a warning.
pub fn check_form(form: &FormMetadata) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut section_ids = BTreeSet::new();
    for section in &form.sections {
        if !section_ids.insert(section.id.as_str()) {
            issues.push(ValidationIssue::warning(
                "duplicate-section",
                section.id.clone(),
                format!("Duplicate section id `{}`", section.id),
            ));
        }
    }

    let field_names = form.field_names();
    let mut seen_names = BTreeSet::new();

    for field in &form.fields {
        if !seen_names.insert(field.name.as_str()) {
            issues.push(ValidationIssue::warning(
                "duplicate-field",
                field.name.clone(),
                format!("Duplicate field name `{}`; later values overwrite earlier ones", field.name),
            ));
        }

        if !section_ids.contains(field.section.as_str()) {
            issues.push(ValidationIssue::error(
                "section-ref",
                field.name.clone(),
                format!(
                    "Field `{}` references unknown section `{}`",
                    field.name, field.section
                ),
            ));
        }

        if let Some(conditional) = &field.conditional
            && !field_names.contains(conditional.field.as_str())
        {
            issues.push(ValidationIssue::warning(
                "conditional-ref",
                field.name.clone(),
                format!(
                    "Conditional on `{}` references unknown field `{}`",
                    field.name, conditional.field
                ),
            ));
        }

        if field.field_type.wants_options() && field.options.is_empty() {
            issues.push(ValidationIssue::warning(
                "options",
                field.name.clone(),
                format!(
                    "{} field `{}` has no options",
                    field.field_type, field.name
                ),
            ));
        }

        if let FieldType::Other(name) = &field.field_type {
            issues.push(ValidationIssue::warning(
                "field-type",
                field.name.clone(),
                format!(
                    "Field `{}` has unsupported type `{name}` and will render as a placeholder",
                    field.name
                ),
            ));
        }

        for rule in &field.validation {
            if let Some(condition) = &rule.condition {
                match Expr::parse(condition) {
                    Ok(expr) => {
                        for referenced in expr.referenced_fields() {
                            if !field_names.contains(referenced.as_str()) {
                                issues.push(ValidationIssue::warning(
                                    "condition-ref",
                                    field.name.clone(),
                                    format!(
                                        "Rule condition on `{}` references unknown field `{referenced}`",
                                        field.name
                                    ),
                                ));
                            }
                        }
                    }
                    Err(error) => {
                        issues.push(ValidationIssue::error(
                            "condition-syntax",
                            field.name.clone(),
                            format!("Rule condition on `{}` does not parse: {error}", field.name),
                        ));
                    }
                }
            }

            if rule.rule_type == RuleType::Pattern {
                match rule.value.as_ref().and_then(FieldValue::as_text) {
                    Some(pattern) => {
                        if regex::Regex::new(pattern).is_err() {
                            issues.push(ValidationIssue::error(
                                "pattern-syntax",
                                field.name.clone(),
                                format!(
                                    "Pattern rule on `{}` has invalid regex `{pattern}`",
                                    field.name
                                ),
                            ));
                        }
                    }
                    None => {
                        issues.push(ValidationIssue::warning(
                            "pattern",
                            field.name.clone(),
                            format!("Pattern rule on `{}` has no pattern string", field.name),
                        ));
                    }
                }
            }
        }
    }

    issues
}
