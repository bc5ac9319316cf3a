//! Merged component API model.

use serde::{Deserialize, Serialize};

/// A named API field (attribute, property, slot, part, custom property or event).
///
/// Blank values are empty strings, never absent, so the serialized shape is
/// the same for every field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
    pub default: String,
}

impl ApiField {
    /// Create a field with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Copy values from `other` into fields that are blank here.
    ///
    /// Non-blank values are never overwritten.
    pub fn fill_blanks(&mut self, other: &ApiField) {
        fill(&mut self.type_name, &other.type_name);
        fill(&mut self.description, &other.description);
        fill(&mut self.default, &other.default);
    }
}

fn fill(target: &mut String, source: &str) {
    if target.trim().is_empty() && !source.trim().is_empty() {
        source.clone_into(target);
    }
}

/// Canonical API description of one custom element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentApiEntity {
    pub tag_name: String,
    pub summary: String,
    pub attributes: Vec<ApiField>,
    pub properties: Vec<ApiField>,
    pub events: Vec<ApiField>,
    pub slots: Vec<ApiField>,
    pub css_parts: Vec<ApiField>,
    pub css_custom_properties: Vec<ApiField>,
    pub a11y: Vec<String>,
    pub notes: Vec<String>,
}
