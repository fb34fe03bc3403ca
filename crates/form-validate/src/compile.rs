//! Form compilation.
//!
//! Rule conditions and pattern regexes are parsed once when a form is loaded,
//! so keystroke-time validation never re-parses authored text. Authoring
//! errors (bad condition syntax, bad regex) surface here as hard errors
//! instead of silently disabling a rule at runtime.

use std::collections::BTreeMap;

use regex::Regex;

use form_expr::Expr;
use form_model::{Field, FieldValue, FormError, FormMetadata, Result, RuleType};

/// A form with its rule conditions and pattern regexes compiled.
///
/// Index keys are `(field index, rule index)` into the metadata's declared
/// order, which the evaluator walks unchanged.
#[derive(Debug)]
pub struct CompiledForm {
    form: FormMetadata,
    rule_conditions: BTreeMap<(usize, usize), Expr>,
    rule_patterns: BTreeMap<(usize, usize), Regex>,
}

impl CompiledForm {
    /// Compile a form's rule conditions and patterns.
    pub fn compile(form: FormMetadata) -> Result<Self> {
        let mut rule_conditions = BTreeMap::new();
        let mut rule_patterns = BTreeMap::new();

        for (field_index, field) in form.fields.iter().enumerate() {
            for (rule_index, rule) in field.validation.iter().enumerate() {
                if let Some(condition) = &rule.condition {
                    let expr =
                        Expr::parse(condition).map_err(|error| FormError::Condition {
                            field: field.name.clone(),
                            message: error.to_string(),
                        })?;
                    rule_conditions.insert((field_index, rule_index), expr);
                }
                if rule.rule_type == RuleType::Pattern
                    && let Some(pattern) = rule.value.as_ref().and_then(FieldValue::as_text)
                {
                    let regex = Regex::new(pattern).map_err(|_| FormError::Pattern {
                        field: field.name.clone(),
                        pattern: pattern.to_string(),
                    })?;
                    rule_patterns.insert((field_index, rule_index), regex);
                }
            }
        }

        Ok(Self {
            form,
            rule_conditions,
            rule_patterns,
        })
    }

    pub fn form(&self) -> &FormMetadata {
        &self.form
    }

    pub(crate) fn field_at(&self, field_index: usize) -> Option<&Field> {
        self.form.fields.get(field_index)
    }

    pub(crate) fn rule_condition(&self, field_index: usize, rule_index: usize) -> Option<&Expr> {
        self.rule_conditions.get(&(field_index, rule_index))
    }

    pub(crate) fn rule_pattern(&self, field_index: usize, rule_index: usize) -> Option<&Regex> {
        self.rule_patterns.get(&(field_index, rule_index))
    }
}
