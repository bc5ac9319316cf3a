//! Custom elements manifest (CEM) extraction.
//!
//! Only the parts of the manifest that describe a custom element's public
//! surface are modelled; everything else is ignored during deserialization.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::ApiField;

/// Root of a `custom-elements.json` file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomElementsManifest {
    pub schema_version: Option<String>,
    pub modules: Vec<CemModule>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CemModule {
    pub path: String,
    pub declarations: Vec<CemDeclaration>,
}

/// A declaration; custom elements are the ones carrying a `tagName`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CemDeclaration {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub tag_name: Option<String>,
    pub custom_element: bool,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub attributes: Vec<CemItem>,
    pub members: Vec<CemItem>,
    pub slots: Vec<CemItem>,
    pub css_parts: Vec<CemItem>,
    pub css_properties: Vec<CemItem>,
}

/// Attribute, member, slot, part or CSS property entry.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CemItem {
    pub name: String,
    pub kind: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: Option<CemType>,
    /// CSS property syntax, used when no `type` is given.
    pub syntax: Option<String>,
    pub description: Option<String>,
    pub default: Option<String>,
    pub privacy: Option<String>,
    #[serde(rename = "static")]
    pub is_static: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CemType {
    pub text: String,
}

impl CemItem {
    fn to_api_field(&self) -> ApiField {
        let type_name = self
            .type_ref
            .as_ref()
            .map(|t| t.text.clone())
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.syntax.clone())
            .unwrap_or_default();
        ApiField {
            name: self.name.trim().to_owned(),
            type_name,
            description: self.description.clone().unwrap_or_default(),
            default: self.default.clone().unwrap_or_default(),
        }
    }

    /// Public, non-static field member.
    fn is_public_property(&self) -> bool {
        self.kind.as_deref() == Some("field")
            && !self.is_static
            && self.privacy.as_deref().is_none_or(|p| p == "public")
    }
}

/// Structured API surface of one custom element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedEntry {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub attributes: Vec<ApiField>,
    pub properties: Vec<ApiField>,
    pub slots: Vec<ApiField>,
    pub css_parts: Vec<ApiField>,
    pub css_properties: Vec<ApiField>,
}

impl ExtractedEntry {
    fn from_declaration(declaration: &CemDeclaration) -> Self {
        let fields = |items: &[CemItem]| items.iter().map(CemItem::to_api_field).collect();
        Self {
            summary: declaration.summary.clone(),
            description: declaration.description.clone(),
            attributes: fields(&declaration.attributes),
            properties: declaration
                .members
                .iter()
                .filter(|m| m.is_public_property())
                .map(CemItem::to_api_field)
                .collect(),
            slots: fields(&declaration.slots),
            css_parts: fields(&declaration.css_parts),
            css_properties: fields(&declaration.css_properties),
        }
    }
}

/// Collect one entry per tag name across all modules.
///
/// When a tag is declared twice the first declaration wins.
#[must_use]
pub fn extract_entries(manifest: &CustomElementsManifest) -> BTreeMap<String, ExtractedEntry> {
    let mut entries = BTreeMap::new();

    for module in &manifest.modules {
        for declaration in &module.declarations {
            let Some(tag) = declaration.tag_name.as_deref().map(str::trim) else {
                if declaration.custom_element {
                    tracing::warn!(
                        module = %module.path,
                        name = declaration.name.as_deref().unwrap_or_default(),
                        "Custom element declaration has no tag name, skipping"
                    );
                }
                continue;
            };
            if entries.contains_key(tag) {
                tracing::warn!(tag, module = %module.path, "Duplicate custom element tag, keeping first");
                continue;
            }
            entries.insert(tag.to_owned(), ExtractedEntry::from_declaration(declaration));
        }
    }

    entries
}
