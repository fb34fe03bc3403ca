pub mod error;
pub mod field;
pub mod form;
pub mod report;
pub mod value;

pub use error::{FormError, Result};
pub use field::{
    Conditional, ConditionalOperator, Field, FieldOption, FieldType, RuleType, ValidationRule,
};
pub use form::{ClientType, FormDependency, FormMetadata, Section};
pub use report::{IssueSeverity, ValidationIssue, ValidationReport};
pub use value::{FieldValue, FormValues};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_counts() {
        let report = ValidationReport {
            form_id: "assessment-bathroom".to_string(),
            issues: vec![
                ValidationIssue::error("required", "roomName", "This field is required"),
                ValidationIssue::warning("options", "roomType", "Select field has no options"),
            ],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
        assert!(!report.is_valid());

        let errors = report.errors_by_field();
        assert_eq!(
            errors.get("roomName").map(String::as_str),
            Some("This field is required")
        );
        assert!(!errors.contains_key("roomType"));
    }

    #[test]
    fn field_value_emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from("x").is_empty());
        assert!(!FieldValue::from(false).is_empty());
        assert!(!FieldValue::List(vec![]).is_empty());
    }

    #[test]
    fn field_value_numeric_coercion() {
        assert_eq!(FieldValue::from(5.0).as_number(), Some(5.0));
        assert_eq!(FieldValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(FieldValue::from(true).as_number(), Some(1.0));
        assert_eq!(FieldValue::from("abc").as_number(), None);
        assert_eq!(FieldValue::Null.as_number(), None);
    }
}
