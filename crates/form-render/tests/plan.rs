//! Render-plan tests: ordering, visibility filtering, collapse handling,
//! and control selection.

use std::collections::BTreeMap;

use form_model::{
    Conditional, ConditionalOperator, Field, FieldOption, FieldType, FormMetadata, FormValues,
    Section,
};
use form_render::{Control, RenderPlan};
use form_validate::CompiledForm;

fn empty_errors() -> BTreeMap<String, String> {
    BTreeMap::new()
}

#[test]
fn sections_keep_authored_order_fields_sort_by_order_key() {
    let form = FormMetadata::new("assessment-entry", "Entry Assessment", "assessment")
        .with_section(Section::new("general", "General"))
        .with_section(Section::new("measurements", "Measurements"))
        .with_field(
            Field::new("f-width", "doorWidth", FieldType::Number)
                .in_section("measurements")
                .with_order(2),
        )
        .with_field(
            Field::new("f-height", "thresholdHeight", FieldType::Number)
                .in_section("measurements")
                .with_order(1),
        )
        .with_field(Field::new("f-name", "entryName", FieldType::Text).in_section("general"));
    let compiled = CompiledForm::compile(form).expect("compile form");

    let plan = RenderPlan::build(&compiled, &FormValues::new(), &empty_errors());
    assert_eq!(plan.sections.len(), 2);
    assert_eq!(plan.sections[0].section_id, "general");
    assert_eq!(plan.sections[1].section_id, "measurements");

    let names: Vec<&str> = plan.sections[1]
        .fields
        .iter()
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(names, vec!["thresholdHeight", "doorWidth"]);
}

#[test]
fn stable_sort_preserves_authored_order_for_equal_keys() {
    let form = FormMetadata::new("f", "F", "assessment")
        .with_section(Section::new("main", "Main"))
        .with_field(Field::new("f-1", "first", FieldType::Text).in_section("main"))
        .with_field(Field::new("f-2", "second", FieldType::Text).in_section("main"));
    let compiled = CompiledForm::compile(form).expect("compile form");

    let plan = RenderPlan::build(&compiled, &FormValues::new(), &empty_errors());
    let names: Vec<&str> = plan.sections[0]
        .fields
        .iter()
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn hidden_fields_are_filtered_from_the_plan() {
    let form = FormMetadata::new("f", "F", "assessment")
        .with_section(Section::new("main", "Main"))
        .with_field(Field::new("f-a", "A", FieldType::Select).in_section("main"))
        .with_field(
            Field::new("f-b", "B", FieldType::Text)
                .in_section("main")
                .with_conditional(Conditional {
                    field: "A".to_string(),
                    operator: ConditionalOperator::Equals,
                    value: "yes".into(),
                }),
        );
    let compiled = CompiledForm::compile(form).expect("compile form");

    let mut values = FormValues::new();
    values.insert("A".to_string(), "no".into());
    let plan = RenderPlan::build(&compiled, &values, &empty_errors());
    assert_eq!(plan.visible_field_count(), 1);

    values.insert("A".to_string(), "yes".into());
    let plan = RenderPlan::build(&compiled, &values, &empty_errors());
    assert_eq!(plan.visible_field_count(), 2);
}

#[test]
fn collapsed_sections_render_no_fields() {
    let form = FormMetadata::new("f", "F", "assessment")
        .with_section(Section::new("details", "Details").collapsible(true))
        .with_field(Field::new("f-x", "x", FieldType::Text).in_section("details"));
    let compiled = CompiledForm::compile(form).expect("compile form");

    let plan = RenderPlan::build(&compiled, &FormValues::new(), &empty_errors());
    assert_eq!(plan.sections.len(), 1);
    assert!(plan.sections[0].collapsed);
    assert!(plan.sections[0].fields.is_empty());
}

#[test]
fn controls_match_field_types() {
    let options = vec![FieldOption {
        value: "bathroom".into(),
        label: "Bathroom".to_string(),
    }];
    let form = FormMetadata::new("f", "F", "assessment")
        .with_section(Section::new("main", "Main"))
        .with_field(
            Field::new("f-type", "roomType", FieldType::Select)
                .in_section("main")
                .with_options(options.clone()),
        )
        .with_field(Field::new("f-date", "visitDate", FieldType::Date).in_section("main"))
        .with_field(Field::new("f-ramp", "hasRamp", FieldType::Switch).in_section("main"))
        .with_field(
            Field::new("f-sig", "signature", FieldType::Other("signature".to_string()))
                .in_section("main"),
        );
    let compiled = CompiledForm::compile(form).expect("compile form");

    let plan = RenderPlan::build(&compiled, &FormValues::new(), &empty_errors());
    let controls: Vec<&Control> = plan.sections[0]
        .fields
        .iter()
        .map(|field| &field.control)
        .collect();
    assert_eq!(controls[0], &Control::Select { options });
    assert_eq!(controls[1], &Control::DatePicker);
    assert_eq!(controls[2], &Control::Toggle);
    assert_eq!(
        controls[3],
        &Control::Placeholder {
            type_name: "signature".to_string()
        }
    );
}

#[test]
fn errors_and_values_attach_to_their_fields() {
    let form = FormMetadata::new("f", "F", "assessment")
        .with_section(Section::new("main", "Main"))
        .with_field(
            Field::new("f-name", "roomName", FieldType::Text)
                .in_section("main")
                .with_label("Room name"),
        );
    let compiled = CompiledForm::compile(form).expect("compile form");

    let mut values = FormValues::new();
    values.insert("roomName".to_string(), "Kitchen".into());
    let mut errors = BTreeMap::new();
    errors.insert("roomName".to_string(), "This field is required".to_string());

    let plan = RenderPlan::build(&compiled, &values, &errors);
    let field = &plan.sections[0].fields[0];
    assert_eq!(field.label, "Room name");
    assert_eq!(field.value, Some("Kitchen".into()));
    assert_eq!(field.error.as_deref(), Some("This field is required"));
}

#[test]
fn plan_serializes_with_tagged_controls() {
    let form = FormMetadata::new("f", "F", "assessment")
        .with_section(Section::new("main", "Main"))
        .with_field(Field::new("f-ramp", "hasRamp", FieldType::Switch).in_section("main"));
    let compiled = CompiledForm::compile(form).expect("compile form");

    let plan = RenderPlan::build(&compiled, &FormValues::new(), &empty_errors());
    let json = serde_json::to_value(&plan).expect("serialize plan");
    assert_eq!(
        json["sections"][0]["fields"][0]["control"].as_str(),
        Some("toggle")
    );
    assert_eq!(json["sections"][0]["fields"][0]["name"].as_str(), Some("hasRamp"));
}

#[test]
fn empty_form_builds_an_empty_plan() {
    let compiled = CompiledForm::compile(FormMetadata::new("empty", "Empty", "assessment"))
        .expect("compile empty form");
    let plan = RenderPlan::build(&compiled, &FormValues::new(), &empty_errors());
    assert!(plan.sections.is_empty());
    assert_eq!(plan.visible_field_count(), 0);
}
