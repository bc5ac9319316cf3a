//! Reconciliation of contracts and extracted manifests.
//!
//! Field families and their sources:
//!
//! | Family                | Contracts        | Manifest     |
//! |-----------------------|------------------|--------------|
//! | attributes            | fills blanks     | wins         |
//! | slots                 | fills blanks     | wins         |
//! | parts                 | fills blanks     | wins         |
//! | css custom properties | fills blanks     | wins         |
//! | properties            | -                | only source  |
//! | events                | only source      | -            |
//! | a11y, notes           | only source      | -            |

use std::collections::{BTreeMap, BTreeSet};

use crate::cem::ExtractedEntry;
use crate::contracts::{ContractEntry, ContractField, ContractsFile};
use crate::model::{ApiField, ComponentApiEntity};

/// Merge both metadata sources of one component.
#[must_use]
pub fn merge(
    tag_name: &str,
    contract: Option<&ContractEntry>,
    extracted: Option<&ExtractedEntry>,
) -> ComponentApiEntity {
    let empty_contract = ContractEntry::default();
    let empty_extracted = ExtractedEntry::default();
    let contract = contract.unwrap_or(&empty_contract);
    let extracted = extracted.unwrap_or(&empty_extracted);

    ComponentApiEntity {
        tag_name: tag_name.to_owned(),
        summary: summary(contract, extracted),
        attributes: merge_family(&extracted.attributes, &contract.attributes),
        properties: merge_family(&extracted.properties, &[]),
        events: merge_family(&[], &contract.events),
        slots: merge_family(&extracted.slots, &contract.slots),
        css_parts: merge_family(&extracted.css_parts, &contract.parts),
        css_custom_properties: merge_family(&extracted.css_properties, &contract.css_properties),
        a11y: non_blank(&contract.a11y),
        notes: non_blank(&contract.notes),
    }
}

/// Merge every component of a package, ordered by tag name.
#[must_use]
pub fn build_components(
    contracts: &ContractsFile,
    extracted: &BTreeMap<String, ExtractedEntry>,
) -> Vec<ComponentApiEntity> {
    let tags: BTreeSet<&String> = contracts.components.keys().chain(extracted.keys()).collect();
    tags.into_iter()
        .map(|tag| merge(tag, contracts.components.get(tag), extracted.get(tag)))
        .collect()
}

/// Union by name: structured records first, then contract entries filling
/// whatever the structured side left blank. Sorted by name.
fn merge_family(structured: &[ApiField], contract: &[ContractField]) -> Vec<ApiField> {
    let mut by_name: BTreeMap<String, ApiField> = BTreeMap::new();

    let incoming = structured
        .iter()
        .cloned()
        .chain(contract.iter().map(ContractField::to_api_field));
    for field in incoming {
        match by_name.get_mut(&field.name) {
            Some(existing) => existing.fill_blanks(&field),
            None => {
                by_name.insert(field.name.clone(), field);
            }
        }
    }

    by_name.into_values().collect()
}

fn summary(contract: &ContractEntry, extracted: &ExtractedEntry) -> String {
    [
        contract.summary.as_deref(),
        extracted.summary.as_deref(),
        extracted.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|s| !s.is_empty())
    .unwrap_or_default()
    .to_owned()
}

fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
