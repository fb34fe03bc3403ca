//! Runtime form values.
//!
//! `FormValues` is the single flat map from field name to current value for
//! one editing session. It is the only mutable runtime state the engine
//! touches; everything else in this crate is declarative metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single field's current value.
///
/// Values arrive from authored JSON and from user edits, so the variants
/// mirror the JSON data model rather than field types: a `Number` field whose
/// control produced text still holds `Text` until coerced by a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// True for `Null` and for the empty string, the two shapes the engine
    /// treats as "no value entered".
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Numeric coercion used by the `minValue`/`maxValue` rules and by
    /// ordering comparisons in condition expressions.
    ///
    /// Returns `None` when the value has no numeric reading; range rules
    /// pass in that case rather than failing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            FieldValue::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Borrow the text content when this value is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Borrow the element list when this value is an array.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Truthiness used by bare field references in condition expressions.
    /// `null`, `false`, `0`, and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(value) => *value,
            FieldValue::Number(value) => *value != 0.0,
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::List(_) => true,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Flat mapping from field name to current value for one editing session.
pub type FormValues = BTreeMap<String, FieldValue>;
