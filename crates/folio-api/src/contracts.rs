//! Hand-authored component contracts.
//!
//! Contracts are written by people, so field entries come in two shapes:
//! a free-text `"name (detail)"` string or a structured record.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::ApiField;

/// Contracts file: `{ "components": { "<tag>": ContractEntry } }`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContractsFile {
    #[serde(default)]
    pub components: BTreeMap<String, ContractEntry>,
}

/// Hand-authored description of one component.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractEntry {
    pub summary: Option<String>,
    pub attributes: Vec<ContractField>,
    pub slots: Vec<ContractField>,
    pub parts: Vec<ContractField>,
    pub css_properties: Vec<ContractField>,
    pub events: Vec<ContractField>,
    pub a11y: Vec<String>,
    pub notes: Vec<String>,
}

/// One field entry of a contract.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ContractField {
    /// `"name (detail)"`; the detail becomes the description.
    Text(String),
    /// `{name, type?, description?, default?}`.
    Record(FieldRecord),
}

/// Structured contract field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
}

impl ContractField {
    /// Normalise the entry into an [`ApiField`].
    #[must_use]
    pub fn to_api_field(&self) -> ApiField {
        match self {
            Self::Text(text) => {
                let (name, detail) = parse_named_detail(text);
                ApiField {
                    description: detail.to_owned(),
                    ..ApiField::named(name)
                }
            }
            Self::Record(record) => ApiField {
                name: record.name.trim().to_owned(),
                type_name: record.type_name.clone().unwrap_or_default(),
                description: record.description.clone().unwrap_or_default(),
                default: record.default.clone().unwrap_or_default(),
            },
        }
    }
}

/// Split `"name (detail)"` on its first parenthesis group.
///
/// Nested parentheses inside the group are kept. A name without a group has
/// an empty detail; an unclosed group runs to the end of the text.
///
/// # Examples
///
/// ```
/// use folio_api::parse_named_detail;
///
/// assert_eq!(parse_named_detail("variant (controls appearance)"), ("variant", "controls appearance"));
/// assert_eq!(parse_named_detail("disabled"), ("disabled", ""));
/// ```
#[must_use]
pub fn parse_named_detail(text: &str) -> (&str, &str) {
    let Some(open) = text.find('(') else {
        return (text.trim(), "");
    };
    let name = text[..open].trim();
    let inner = &text[open + 1..];

    let mut depth = 1usize;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return (name, inner[..i].trim());
                }
            }
            _ => {}
        }
    }
    (name, inner.trim())
}
