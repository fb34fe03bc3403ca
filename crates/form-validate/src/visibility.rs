//! Conditional-visibility evaluation.

use form_model::{ConditionalOperator, Field, FieldValue, FormValues};

/// Decide whether a field participates in rendering and validation.
///
/// Pure function of the field and the current value map. A field with no
/// `conditional` is always visible.
pub fn is_visible(field: &Field, values: &FormValues) -> bool {
    let Some(conditional) = &field.conditional else {
        return true;
    };
    let source = values.get(&conditional.field);
    match conditional.operator {
        ConditionalOperator::Equals => source == Some(&conditional.value),
        ConditionalOperator::NotEquals => source != Some(&conditional.value),
        ConditionalOperator::Includes => source
            .and_then(FieldValue::as_list)
            .is_some_and(|items| items.contains(&conditional.value)),
        // Preserved truth table: a source value that is not an array
        // (including one never set) satisfies notIncludes. Flagged for
        // product-owner review; do not "correct" without sign-off.
        ConditionalOperator::NotIncludes => match source.and_then(FieldValue::as_list) {
            Some(items) => !items.contains(&conditional.value),
            None => true,
        },
    }
}
