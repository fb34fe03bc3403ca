//! Field definitions: types, options, validation rules, and conditional
//! visibility triples.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Control type of a field, as authored in form definitions.
///
/// Unrecognized type strings deserialize into `Other` instead of failing the
/// whole form; the renderer shows a placeholder control for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Number,
    Textarea,
    Select,
    Multiselect,
    Radio,
    Switch,
    Date,
    File,
    #[serde(untagged)]
    Other(String),
}

impl FieldType {
    /// Canonical authored name for this type.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Radio => "radio",
            FieldType::Switch => "switch",
            FieldType::Date => "date",
            FieldType::File => "file",
            FieldType::Other(name) => name.as_str(),
        }
    }

    /// True for types whose control is driven by an `options` list.
    pub fn wants_options(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Multiselect | FieldType::Radio
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One selectable option of a select/radio/multiselect field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: FieldValue,
    pub label: String,
}

/// Kind of a validation rule.
///
/// Unknown rule type strings are preserved in `Other` and skipped by the
/// evaluator, matching the tolerant handling of unknown field types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleType {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Email,
    MinValue,
    MaxValue,
    #[serde(untagged)]
    Other(String),
}

impl RuleType {
    pub fn as_str(&self) -> &str {
        match self {
            RuleType::Required => "required",
            RuleType::MinLength => "minLength",
            RuleType::MaxLength => "maxLength",
            RuleType::Pattern => "pattern",
            RuleType::Email => "email",
            RuleType::MinValue => "minValue",
            RuleType::MaxValue => "maxValue",
            RuleType::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single validation constraint on a field.
///
/// `condition` is a boolean expression over the whole value map, authored in
/// the condition mini-language; when it evaluates false the rule is skipped
/// entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Rule argument: a length for `minLength`/`maxLength`, a bound for
    /// `minValue`/`maxValue`, a regular expression for `pattern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    /// Override for the rule's default error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl ValidationRule {
    pub fn new(rule_type: RuleType) -> Self {
        Self {
            rule_type,
            value: None,
            message: None,
            condition: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// Operator of a conditional-visibility triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionalOperator {
    Equals,
    NotEquals,
    Includes,
    NotIncludes,
}

/// Conditional visibility: show this field only when another field's current
/// value satisfies `operator`/`value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    /// Name of the field whose value gates visibility.
    pub field: String,
    pub operator: ConditionalOperator,
    pub value: FieldValue,
}

/// One data-entry unit within a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    /// Key under which this field's value is stored in `FormValues`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Id of the section this field belongs to.
    pub section: String,
    /// Layout width class (e.g. "full", "half"); purely presentational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Sort key within the owning section; defaults to 0.
    #[serde(default)]
    pub order: i32,
}

impl Field {
    /// Minimal field for construction in code and tests.
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        let id = id.into();
        Self {
            name: name.into(),
            id,
            label: None,
            field_type,
            section: String::new(),
            width: None,
            required: false,
            validation: Vec::new(),
            conditional: None,
            options: Vec::new(),
            order: 0,
        }
    }

    #[must_use]
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    #[must_use]
    pub fn with_conditional(mut self, conditional: Conditional) -> Self {
        self.conditional = Some(conditional);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    /// Display label, falling back to the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
