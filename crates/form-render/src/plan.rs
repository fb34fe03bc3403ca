//! Render planning.
//!
//! A [`RenderPlan`] is the declarative answer to "what should be on screen
//! right now": sections in authored order, visible fields sorted by their
//! order key, each mapped to a concrete control. The plan is recomputed from
//! the metadata and the current values on every pass; it holds no state of
//! its own.

use std::collections::BTreeMap;

use serde::Serialize;

use form_model::{Field, FieldOption, FieldType, FieldValue, FormValues};
use form_validate::{CompiledForm, is_visible};

/// Concrete input control for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum Control {
    TextInput,
    EmailInput,
    PhoneInput,
    NumberInput,
    TextArea,
    Select { options: Vec<FieldOption> },
    MultiSelect { options: Vec<FieldOption> },
    RadioGroup { options: Vec<FieldOption> },
    Toggle,
    DatePicker,
    FileUpload,
    /// Visible placeholder for an unrecognized field type; rendering never
    /// fails on unknown types.
    Placeholder { type_name: String },
}

impl Control {
    pub fn for_field(field: &Field) -> Self {
        match &field.field_type {
            FieldType::Text => Control::TextInput,
            FieldType::Email => Control::EmailInput,
            FieldType::Phone => Control::PhoneInput,
            FieldType::Number => Control::NumberInput,
            FieldType::Textarea => Control::TextArea,
            FieldType::Select => Control::Select {
                options: field.options.clone(),
            },
            FieldType::Multiselect => Control::MultiSelect {
                options: field.options.clone(),
            },
            FieldType::Radio => Control::RadioGroup {
                options: field.options.clone(),
            },
            FieldType::Switch => Control::Toggle,
            FieldType::Date => Control::DatePicker,
            FieldType::File => Control::FileUpload,
            FieldType::Other(name) => Control::Placeholder {
                type_name: name.clone(),
            },
        }
    }
}

/// One field as it should render right now.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderField {
    pub field_id: String,
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub control: Control,
    pub width: Option<String>,
    pub required: bool,
    pub value: Option<FieldValue>,
    pub error: Option<String>,
}

/// One section with its currently visible fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSection {
    pub section_id: String,
    pub title: String,
    pub description: Option<String>,
    pub collapsible: bool,
    pub collapsed: bool,
    /// Empty when the section is collapsed; its fields still validate.
    pub fields: Vec<RenderField>,
}

/// The full render plan for one pass.
#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    pub sections: Vec<RenderSection>,
}

impl RenderPlan {
    /// Build a plan from the compiled form, the current values, and the
    /// per-field errors recorded by the last validation pass.
    ///
    /// Sections keep their authored array order (there is no section-level
    /// order key). Fields within a section sort ascending by `order`; the
    /// sort is stable so equal keys keep authored order. Fields whose
    /// conditional is unsatisfied are filtered out; fields referencing a
    /// section not in the plan do not render at all.
    pub fn build(
        compiled: &CompiledForm,
        values: &FormValues,
        errors: &BTreeMap<String, String>,
    ) -> Self {
        let form = compiled.form();
        let sections = form
            .sections
            .iter()
            .map(|section| {
                let fields = if section.collapsed {
                    Vec::new()
                } else {
                    form.fields_in_section(&section.id)
                        .into_iter()
                        .filter(|field| is_visible(field, values))
                        .map(|field| render_field(field, values, errors))
                        .collect()
                };
                RenderSection {
                    section_id: section.id.clone(),
                    title: section.title.clone(),
                    description: section.description.clone(),
                    collapsible: section.collapsible,
                    collapsed: section.collapsed,
                    fields,
                }
            })
            .collect();
        Self { sections }
    }

    /// Total number of fields currently on screen.
    pub fn visible_field_count(&self) -> usize {
        self.sections.iter().map(|section| section.fields.len()).sum()
    }
}

fn render_field(
    field: &Field,
    values: &FormValues,
    errors: &BTreeMap<String, String>,
) -> RenderField {
    RenderField {
        field_id: field.id.clone(),
        name: field.name.clone(),
        label: field.display_label().to_string(),
        control: Control::for_field(field),
        width: field.width.clone(),
        required: field.required,
        value: values.get(&field.name).cloned(),
        error: errors.get(&field.name).cloned(),
    }
}
