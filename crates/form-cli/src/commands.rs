use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span};

use form_model::{FormMetadata, FormValues, ValidationIssue, ValidationReport};
use form_render::RenderPlan;
use form_validate::{CompiledForm, check_form, validate_form, write_validation_report_json};

use crate::cli::{CheckArgs, FieldsArgs, ValidateArgs};
use crate::summary::apply_table_style;

/// Outcome of the `check` command.
pub struct CheckResult {
    pub form_id: String,
    pub issues: Vec<ValidationIssue>,
}

/// Outcome of the `validate` command.
pub struct ValidateResult {
    pub report: ValidationReport,
    pub report_path: Option<PathBuf>,
    /// Fields currently on screen, after conditional visibility.
    pub visible_fields: usize,
    pub total_fields: usize,
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let form = load_form(&args.form)?;
    let span = info_span!("check", form_id = %form.id);
    let _guard = span.enter();

    let issues = check_form(&form);
    info!(
        issues = issues.len(),
        fields = form.fields.len(),
        sections = form.sections.len(),
        "checked form definition"
    );
    Ok(CheckResult {
        form_id: form.id,
        issues,
    })
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let form = load_form(&args.form)?;
    let span = info_span!("validate", form_id = %form.id);
    let _guard = span.enter();

    let compiled = CompiledForm::compile(form).context("compile form")?;
    let values = load_values(&args.values)?;
    debug!(values = values.len(), "loaded values file");

    let report = validate_form(&compiled, &values);
    info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated values"
    );

    let plan = RenderPlan::build(&compiled, &values, &report.errors_by_field());
    let total_fields = compiled.form().fields.len();

    let report_path = match &args.report_dir {
        Some(dir) => Some(
            write_validation_report_json(dir, &report).context("write validation report")?,
        ),
        None => None,
    };
    Ok(ValidateResult {
        report,
        report_path,
        visible_fields: plan.visible_field_count(),
        total_fields,
    })
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let form = load_form(&args.form)?;

    let mut table = Table::new();
    table.set_header(vec![
        "Name", "Label", "Type", "Section", "Required", "Rules",
    ]);
    apply_table_style(&mut table);
    for field in &form.fields {
        let rules: Vec<&str> = field
            .validation
            .iter()
            .map(|rule| rule.rule_type.as_str())
            .collect();
        table.add_row(vec![
            field.name.clone(),
            field.display_label().to_string(),
            field.field_type.to_string(),
            field.section.clone(),
            if field.required { "yes" } else { "" }.to_string(),
            rules.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn load_form(path: &Path) -> Result<FormMetadata> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read form definition {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parse form definition {}", path.display()))
}

fn load_values(path: &Path) -> Result<FormValues> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read values file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse values file {}", path.display()))
}
