//! The form definition: sections, fields, and inter-form dependencies.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Client/funding program a form applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClientType {
    /// Family Development Foundation program.
    Fdf,
    /// Abu Dhabi Housing Authority program.
    Adha,
    /// Self-funded (cash) clients.
    Cash,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Fdf => "FDF",
            ClientType::Adha => "ADHA",
            ClientType::Cash => "CASH",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FDF" => Ok(ClientType::Fdf),
            "ADHA" => Ok(ClientType::Adha),
            "CASH" => Ok(ClientType::Cash),
            _ => Err(format!("Unknown client type: {s}")),
        }
    }
}

/// A presentational grouping of fields. Sections have no lifecycle of their
/// own; they are created and destroyed with their parent form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub collapsed: bool,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            collapsible: false,
            collapsed: false,
        }
    }

    #[must_use]
    pub fn collapsible(mut self, collapsed: bool) -> Self {
        self.collapsible = true;
        self.collapsed = collapsed;
        self
    }
}

/// Reference from one form to another. Recorded for authoring tools only;
/// never enforced at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDependency {
    pub form_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Declarative description of one form.
///
/// Sections render in the order they appear in `sections`; fields carry their
/// own `order` key within a section. There is no section-level order field in
/// authored definitions, so the array order is the authoring contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormMetadata {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning platform module (e.g. "assessment", "inspection").
    pub module: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub client_types: Vec<ClientType>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<FormDependency>,
}

fn default_active() -> bool {
    true
}

impl FormMetadata {
    pub fn new(id: impl Into<String>, title: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            module: module.into(),
            version: "1.0".to_string(),
            client_types: Vec::new(),
            active: true,
            sections: Vec::new(),
            fields: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field by its value-map name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Look up a section by id.
    pub fn section_by_id(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// All field names, for reference checks.
    pub fn field_names(&self) -> BTreeSet<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Fields belonging to the given section, sorted ascending by `order`.
    /// The sort is stable, so fields with equal order keep authored order.
    pub fn fields_in_section(&self, section_id: &str) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self
            .fields
            .iter()
            .filter(|field| field.section == section_id)
            .collect();
        fields.sort_by_key(|field| field.order);
        fields
    }
}
