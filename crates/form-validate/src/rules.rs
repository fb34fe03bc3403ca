//! Per-rule semantics.
//!
//! Each rule looks at the field's current value and produces a failure
//! message or nothing. Coercion behavior is deliberate and narrow: length
//! rules check strings only, range rules apply only when the value has a
//! numeric reading, and a missing value fails nothing but `required`.

use std::sync::LazyLock;

use regex::Regex;

use form_model::{Field, FieldValue, FormValues, RuleType, ValidationRule};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Apply one rule. Returns the failure message (the rule's override when
/// authored, otherwise the default for the rule type), or `None` on pass.
pub(crate) fn apply_rule(
    field: &Field,
    rule: &ValidationRule,
    pattern: Option<&Regex>,
    values: &FormValues,
) -> Option<String> {
    let value = values.get(&field.name);
    let failed = match &rule.rule_type {
        RuleType::Required => value.is_none_or(FieldValue::is_empty),
        RuleType::MinLength => {
            rule_limit(rule).is_some_and(|limit| {
                text_length(value).is_some_and(|length| length < limit)
            })
        }
        RuleType::MaxLength => {
            rule_limit(rule).is_some_and(|limit| {
                text_length(value).is_some_and(|length| length > limit)
            })
        }
        RuleType::Pattern => match (pattern, value.and_then(FieldValue::as_text)) {
            (Some(regex), Some(text)) => !regex.is_match(text),
            _ => false,
        },
        RuleType::Email => value
            .and_then(FieldValue::as_text)
            .is_some_and(|text| !EMAIL_RE.is_match(text)),
        RuleType::MinValue => {
            rule_bound(rule).is_some_and(|bound| {
                value
                    .and_then(FieldValue::as_number)
                    .is_some_and(|number| number < bound)
            })
        }
        RuleType::MaxValue => {
            rule_bound(rule).is_some_and(|bound| {
                value
                    .and_then(FieldValue::as_number)
                    .is_some_and(|number| number > bound)
            })
        }
        // Unknown rule types are preserved in metadata but never fail.
        RuleType::Other(_) => false,
    };

    if !failed {
        return None;
    }
    Some(
        rule.message
            .clone()
            .unwrap_or_else(|| default_message(rule)),
    )
}

fn rule_limit(rule: &ValidationRule) -> Option<usize> {
    let number = rule.value.as_ref()?.as_number()?;
    if number < 0.0 {
        return None;
    }
    Some(number as usize)
}

fn rule_bound(rule: &ValidationRule) -> Option<f64> {
    rule.value.as_ref()?.as_number()
}

/// Character count of a string value. Non-strings are not length-checked.
fn text_length(value: Option<&FieldValue>) -> Option<usize> {
    value
        .and_then(FieldValue::as_text)
        .map(|text| text.chars().count())
}

pub(crate) fn default_message(rule: &ValidationRule) -> String {
    let argument = rule.value.as_ref();
    match &rule.rule_type {
        RuleType::Required => "This field is required".to_string(),
        RuleType::MinLength => format!(
            "Must be at least {} characters",
            display_argument(argument)
        ),
        RuleType::MaxLength => format!("Must be at most {} characters", display_argument(argument)),
        RuleType::Pattern => "Invalid format".to_string(),
        RuleType::Email => "Invalid email address".to_string(),
        RuleType::MinValue => format!("Must be at least {}", display_argument(argument)),
        RuleType::MaxValue => format!("Must be at most {}", display_argument(argument)),
        RuleType::Other(name) => format!("Failed {name} validation"),
    }
}

fn display_argument(argument: Option<&FieldValue>) -> String {
    match argument {
        Some(FieldValue::Number(number)) if number.fract() == 0.0 => {
            format!("{}", *number as i64)
        }
        Some(FieldValue::Number(number)) => format!("{number}"),
        Some(FieldValue::Text(text)) => text.clone(),
        _ => "?".to_string(),
    }
}
