//! Condition mini-language for form validation rules.
//!
//! Rule conditions and other authorable predicates are boolean expressions
//! over the current form-value map: field comparisons joined by `and`/`or`
//! (or `&&`/`||`), with parentheses and negation. Expressions are parsed once
//! at form-load time into an [`Expr`] and evaluated per pass; no host-language
//! code evaluation is involved.
//!
//! ```
//! use form_expr::Expr;
//! use form_model::{FieldValue, FormValues};
//!
//! let expr = Expr::parse("formValues.hasElevator === true && floors > 1").unwrap();
//! let mut values = FormValues::new();
//! values.insert("hasElevator".to_string(), FieldValue::Bool(true));
//! values.insert("floors".to_string(), FieldValue::Number(3.0));
//! assert!(expr.eval(&values));
//! ```

mod parse;
mod token;

use std::collections::BTreeSet;

use thiserror::Error;

use form_model::{FieldValue, FormValues};

/// Error produced while parsing a condition expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },
    #[error("unexpected token at offset {offset}")]
    UnexpectedToken { offset: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("invalid number `{text}` at offset {offset}")]
    BadNumber { text: String, offset: usize },
    #[error("invalid field reference `{text}` at offset {offset}")]
    BadFieldRef { text: String, offset: usize },
    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Comparison operator of a [`Expr::Compare`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Parsed condition expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(FieldValue),
    /// Reference to a field's current value, by value-map name.
    Field(String),
    Not(Box<Expr>),
    Compare {
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Parse an expression from its authored source text.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        parse::parse(source)
    }

    /// Evaluate against the current value map.
    ///
    /// Equality is strict (type-sensitive): `"5" == 5` is false. Ordering
    /// comparisons apply only when both sides coerce to numbers; otherwise
    /// they are false, matching how the range rules treat non-numeric values.
    pub fn eval(&self, values: &FormValues) -> bool {
        self.eval_value(values).is_truthy()
    }

    fn eval_value(&self, values: &FormValues) -> FieldValue {
        match self {
            Expr::Literal(value) => value.clone(),
            Expr::Field(name) => values.get(name).cloned().unwrap_or(FieldValue::Null),
            Expr::Not(inner) => FieldValue::Bool(!inner.eval(values)),
            Expr::Compare { op, lhs, rhs } => {
                let lhs = lhs.eval_value(values);
                let rhs = rhs.eval_value(values);
                FieldValue::Bool(compare(*op, &lhs, &rhs))
            }
            Expr::And(lhs, rhs) => FieldValue::Bool(lhs.eval(values) && rhs.eval(values)),
            Expr::Or(lhs, rhs) => FieldValue::Bool(lhs.eval(values) || rhs.eval(values)),
        }
    }

    /// Names of all fields the expression reads, for integrity checks.
    pub fn referenced_fields(&self) -> BTreeSet<String> {
        let mut fields = BTreeSet::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields(&self, fields: &mut BTreeSet<String>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Field(name) => {
                fields.insert(name.clone());
            }
            Expr::Not(inner) => inner.collect_fields(fields),
            Expr::Compare { lhs, rhs, .. } | Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                lhs.collect_fields(fields);
                rhs.collect_fields(fields);
            }
        }
    }
}

fn compare(op: CompareOp, lhs: &FieldValue, rhs: &FieldValue) -> bool {
    match op {
        CompareOp::Eq => lhs == rhs,
        CompareOp::Ne => lhs != rhs,
        CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
            let (Some(lhs), Some(rhs)) = (lhs.as_number(), rhs.as_number()) else {
                return false;
            };
            match op {
                CompareOp::Lt => lhs < rhs,
                CompareOp::Le => lhs <= rhs,
                CompareOp::Gt => lhs > rhs,
                CompareOp::Ge => lhs >= rhs,
                CompareOp::Eq | CompareOp::Ne => unreachable!(),
            }
        }
    }
}
