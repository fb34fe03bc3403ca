//! Parser and evaluator tests for the condition mini-language.

use form_expr::{Expr, ParseError};
use form_model::{FieldValue, FormValues};

fn values(pairs: Vec<(&str, FieldValue)>) -> FormValues {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[test]
fn strict_equality_is_type_sensitive() {
    let expr = Expr::parse("age == 5").unwrap();
    assert!(expr.eval(&values(vec![("age", FieldValue::Number(5.0))])));
    // A text "5" is not the number 5.
    assert!(!expr.eval(&values(vec![("age", FieldValue::from("5"))])));
}

#[test]
fn js_style_operators_are_accepted() {
    let expr = Expr::parse("formValues.approved === true && formValues.total !== 0").unwrap();
    assert!(expr.eval(&values(vec![
        ("approved", FieldValue::Bool(true)),
        ("total", FieldValue::Number(12.0)),
    ])));
    assert!(!expr.eval(&values(vec![
        ("approved", FieldValue::Bool(true)),
        ("total", FieldValue::Number(0.0)),
    ])));
}

#[test]
fn keyword_operators_match_symbol_operators() {
    let keyword = Expr::parse("a == 1 or b == 2 and not c").unwrap();
    let symbols = Expr::parse("a == 1 || b == 2 && !c").unwrap();
    for c in [FieldValue::Bool(true), FieldValue::Bool(false)] {
        let map = values(vec![
            ("a", FieldValue::Number(0.0)),
            ("b", FieldValue::Number(2.0)),
            ("c", c.clone()),
        ]);
        assert_eq!(keyword.eval(&map), symbols.eval(&map));
    }
}

#[test]
fn ordering_requires_numeric_coercion() {
    let expr = Expr::parse("score >= 10").unwrap();
    assert!(expr.eval(&values(vec![("score", FieldValue::Number(10.0))])));
    assert!(expr.eval(&values(vec![("score", FieldValue::from("15"))])));
    // Non-numeric text has no ordering; the comparison is false.
    assert!(!expr.eval(&values(vec![("score", FieldValue::from("high"))])));
    assert!(!expr.eval(&values(vec![])));
}

#[test]
fn missing_field_reads_as_null() {
    let expr = Expr::parse("status == null").unwrap();
    assert!(expr.eval(&values(vec![])));
    assert!(!expr.eval(&values(vec![("status", FieldValue::from("open"))])));
}

#[test]
fn bare_field_reference_is_truthy_check() {
    let expr = Expr::parse("formValues.hasRamp").unwrap();
    assert!(expr.eval(&values(vec![("hasRamp", FieldValue::Bool(true))])));
    assert!(!expr.eval(&values(vec![("hasRamp", FieldValue::Bool(false))])));
    assert!(!expr.eval(&values(vec![("hasRamp", FieldValue::from(""))])));
    assert!(!expr.eval(&values(vec![])));
}

#[test]
fn string_literals_support_both_quotes() {
    let double = Expr::parse("clientType == \"FDF\"").unwrap();
    let single = Expr::parse("clientType == 'FDF'").unwrap();
    let map = values(vec![("clientType", FieldValue::from("FDF"))]);
    assert!(double.eval(&map));
    assert!(single.eval(&map));
}

#[test]
fn negative_numbers_parse() {
    let expr = Expr::parse("delta > -5").unwrap();
    assert!(expr.eval(&values(vec![("delta", FieldValue::Number(-1.0))])));
    assert!(!expr.eval(&values(vec![("delta", FieldValue::Number(-9.0))])));
}

#[test]
fn parentheses_override_precedence() {
    let grouped = Expr::parse("(a || b) && c").unwrap();
    let map = values(vec![
        ("a", FieldValue::Bool(true)),
        ("b", FieldValue::Bool(false)),
        ("c", FieldValue::Bool(false)),
    ]);
    assert!(!grouped.eval(&map));

    let ungrouped = Expr::parse("a || b && c").unwrap();
    assert!(ungrouped.eval(&map));
}

#[test]
fn referenced_fields_are_collected() {
    let expr = Expr::parse("formValues.a == 1 && (b < 2 || !c)").unwrap();
    let fields = expr.referenced_fields();
    assert_eq!(
        fields.into_iter().collect::<Vec<_>>(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn parse_errors_carry_offsets() {
    assert!(matches!(
        Expr::parse("a == "),
        Err(ParseError::UnexpectedEnd)
    ));
    assert!(matches!(
        Expr::parse("a == 'open"),
        Err(ParseError::UnterminatedString { .. })
    ));
    assert!(matches!(
        Expr::parse("a @ 1"),
        Err(ParseError::UnexpectedChar { found: '@', .. })
    ));
    assert!(matches!(
        Expr::parse("a == 1 b"),
        Err(ParseError::TrailingInput { .. })
    ));
    assert!(matches!(
        Expr::parse("formValues."),
        Err(ParseError::BadFieldRef { .. })
    ));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Evaluation is a pure function of the value map: evaluating the
        /// same expression against the same values twice agrees.
        #[test]
        fn eval_is_deterministic(flag: bool, number in -1000.0f64..1000.0) {
            let expr = Expr::parse("flag == true && amount >= 0").unwrap();
            let map = values(vec![
                ("flag", FieldValue::Bool(flag)),
                ("amount", FieldValue::Number(number)),
            ]);
            prop_assert_eq!(expr.eval(&map), expr.eval(&map));
            prop_assert_eq!(expr.eval(&map), flag && number >= 0.0);
        }

        /// Any simple comparison of an identifier against a number parses.
        #[test]
        fn simple_comparisons_parse(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}", bound in -1000i64..1000) {
            let source = format!("formValues.{name} <= {bound}");
            let expr = Expr::parse(&source).unwrap();
            prop_assert!(expr.referenced_fields().contains(&name));
        }
    }
}
