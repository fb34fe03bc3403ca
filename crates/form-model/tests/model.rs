//! Serde tests for the authored form-definition format.

use form_model::{
    ClientType, ConditionalOperator, FieldType, FieldValue, FormMetadata, FormValues, RuleType,
};

const BATHROOM_FORM: &str = r#"{
  "id": "assessment-bathroom",
  "title": "Bathroom Assessment",
  "description": "Room-by-room accessibility assessment",
  "module": "assessment",
  "version": "1.2",
  "clientTypes": ["FDF", "ADHA"],
  "active": true,
  "sections": [
    { "id": "general", "title": "General" },
    { "id": "fixtures", "title": "Fixtures", "collapsible": true, "collapsed": true }
  ],
  "fields": [
    {
      "id": "f-room",
      "name": "roomName",
      "label": "Room name",
      "type": "text",
      "section": "general",
      "width": "half",
      "required": true,
      "validation": [
        { "type": "required" },
        { "type": "maxLength", "value": 50 }
      ],
      "order": 1
    },
    {
      "id": "f-mods",
      "name": "modifications",
      "type": "multiselect",
      "section": "fixtures",
      "options": [
        { "value": "grab-bars", "label": "Grab bars" },
        { "value": "ramp", "label": "Ramp" }
      ]
    },
    {
      "id": "f-other",
      "name": "otherModification",
      "type": "text",
      "section": "fixtures",
      "conditional": {
        "field": "modifications",
        "operator": "includes",
        "value": "other"
      }
    }
  ],
  "dependencies": [
    { "formId": "assessment-summary" }
  ]
}"#;

#[test]
fn authored_form_deserializes() {
    let form: FormMetadata = serde_json::from_str(BATHROOM_FORM).expect("parse form");
    assert_eq!(form.id, "assessment-bathroom");
    assert_eq!(form.client_types, vec![ClientType::Fdf, ClientType::Adha]);
    assert_eq!(form.sections.len(), 2);
    assert!(form.sections[1].collapsible);
    assert_eq!(form.fields.len(), 3);

    let room = form.field_by_name("roomName").expect("roomName field");
    assert_eq!(room.field_type, FieldType::Text);
    assert_eq!(room.order, 1);
    assert_eq!(room.validation[0].rule_type, RuleType::Required);
    assert_eq!(room.validation[1].rule_type, RuleType::MaxLength);
    assert_eq!(room.validation[1].value, Some(FieldValue::Number(50.0)));

    let other = form.field_by_name("otherModification").expect("field");
    let conditional = other.conditional.as_ref().expect("conditional");
    assert_eq!(conditional.operator, ConditionalOperator::Includes);
    assert_eq!(conditional.value, FieldValue::from("other"));
}

#[test]
fn form_round_trips_through_json() {
    let form: FormMetadata = serde_json::from_str(BATHROOM_FORM).expect("parse form");
    let json = serde_json::to_string(&form).expect("serialize form");
    let round: FormMetadata = serde_json::from_str(&json).expect("reparse form");
    assert_eq!(form, round);
}

#[test]
fn unknown_field_and_rule_types_are_preserved() {
    let json = r#"{
      "id": "f", "title": "F", "module": "assessment", "version": "1.0",
      "sections": [{ "id": "main", "title": "Main" }],
      "fields": [{
        "id": "f-sig", "name": "signature", "type": "signature",
        "section": "main",
        "validation": [{ "type": "crossField" }]
      }]
    }"#;
    let form: FormMetadata = serde_json::from_str(json).expect("parse form");
    let field = &form.fields[0];
    assert_eq!(field.field_type, FieldType::Other("signature".to_string()));
    assert_eq!(
        field.validation[0].rule_type,
        RuleType::Other("crossField".to_string())
    );
}

#[test]
fn values_parse_as_flat_untyped_map() {
    let json = r#"{
      "roomName": "Bathroom",
      "doorWidth": 92.5,
      "hasRamp": false,
      "modifications": ["grab-bars", "ramp"],
      "notes": null
    }"#;
    let values: FormValues = serde_json::from_str(json).expect("parse values");
    assert_eq!(values.get("roomName"), Some(&FieldValue::from("Bathroom")));
    assert_eq!(values.get("doorWidth"), Some(&FieldValue::Number(92.5)));
    assert_eq!(values.get("hasRamp"), Some(&FieldValue::Bool(false)));
    assert_eq!(
        values.get("modifications"),
        Some(&FieldValue::from(vec!["grab-bars", "ramp"]))
    );
    assert_eq!(values.get("notes"), Some(&FieldValue::Null));
}

#[test]
fn client_type_parses_case_insensitively() {
    assert_eq!("fdf".parse::<ClientType>(), Ok(ClientType::Fdf));
    assert_eq!(" CASH ".parse::<ClientType>(), Ok(ClientType::Cash));
    assert!("unknown".parse::<ClientType>().is_err());
}

#[test]
fn missing_optional_keys_take_defaults() {
    let json = r#"{
      "id": "f", "title": "F", "module": "assessment", "version": "1.0"
    }"#;
    let form: FormMetadata = serde_json::from_str(json).expect("parse form");
    assert!(form.active);
    assert!(form.sections.is_empty());
    assert!(form.fields.is_empty());
    assert!(form.client_types.is_empty());
}
