use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use form_model::{IssueSeverity, ValidationIssue};

use crate::commands::{CheckResult, ValidateResult};

pub fn print_check_summary(result: &CheckResult) {
    println!("Form: {}", result.form_id);
    if result.issues.is_empty() {
        println!("No integrity issues found.");
        return;
    }
    print_issue_table(&result.issues);
    println!(
        "{} error(s), {} warning(s)",
        count(&result.issues, IssueSeverity::Error),
        count(&result.issues, IssueSeverity::Warning)
    );
}

pub fn print_validate_summary(result: &ValidateResult) {
    println!("Form: {}", result.report.form_id);
    println!(
        "Visible fields: {} of {}",
        result.visible_fields, result.total_fields
    );
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }
    if result.report.issues.is_empty() {
        println!("All visible fields pass validation.");
        return;
    }
    print_issue_table(&result.report.issues);
    println!(
        "{} error(s), {} warning(s)",
        result.report.error_count(),
        result.report.warning_count()
    );
}

fn print_issue_table(issues: &[ValidationIssue]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Field"),
        header_cell("Rule"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.field.as_deref().unwrap_or("-")),
            Cell::new(&issue.rule),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("error").fg(Color::Red).add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("warning").fg(Color::Yellow),
    }
}

fn count(issues: &[ValidationIssue], severity: IssueSeverity) -> usize {
    issues
        .iter()
        .filter(|issue| issue.severity == severity)
        .count()
}
