//! Component API model for Folio.
//!
//! Two metadata sources describe every component:
//!
//! - **contracts**: hand-authored JSON with summaries, events, accessibility
//!   notes and free-text field descriptions ([`ContractsFile`])
//! - **custom elements manifest**: structured output of static analysis with
//!   reliable names and types ([`CustomElementsManifest`])
//!
//! [`build_components`] reconciles them into one [`ComponentApiEntity`] per
//! tag. Structured values win; contract text only fills what the manifest
//! left blank.

mod cem;
mod contracts;
mod error;
mod merge;
mod model;

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;

pub use cem::{
    CemDeclaration, CemItem, CemModule, CemType, CustomElementsManifest, ExtractedEntry,
    extract_entries,
};
pub use contracts::{ContractEntry, ContractField, ContractsFile, FieldRecord, parse_named_detail};
pub use error::ApiError;
pub use merge::{build_components, merge};
pub use model::{ApiField, ComponentApiEntity};

/// Load a contracts file.
pub fn load_contracts(path: &Path) -> Result<ContractsFile, ApiError> {
    read_json(path)
}

/// Load a custom elements manifest and extract its tagged declarations.
pub fn load_manifest(path: &Path) -> Result<BTreeMap<String, ExtractedEntry>, ApiError> {
    let manifest: CustomElementsManifest = read_json(path)?;
    tracing::debug!(
        path = %path.display(),
        schema_version = manifest.schema_version.as_deref().unwrap_or("unknown"),
        "Loaded custom elements manifest"
    );
    Ok(extract_entries(&manifest))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    let content = std::fs::read_to_string(path).map_err(|source| ApiError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ApiError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_contracts_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let contracts_path = dir.path().join("contracts.json");
        let cem_path = dir.path().join("custom-elements.json");
        std::fs::write(
            &contracts_path,
            r#"{"components": {"x-tag": {"summary": "Label.", "attributes": ["tone (color tone)"]}}}"#,
        )
        .unwrap();
        std::fs::write(
            &cem_path,
            r#"{"schemaVersion": "1.0.0", "modules": [{"path": "tag.js", "declarations": [
                {"kind": "class", "tagName": "x-tag", "attributes": [{"name": "tone", "type": {"text": "string"}}]}
            ]}]}"#,
        )
        .unwrap();

        let contracts = load_contracts(&contracts_path).unwrap();
        let extracted = load_manifest(&cem_path).unwrap();
        let components = build_components(&contracts, &extracted);

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].summary, "Label.");
        assert_eq!(components[0].attributes[0].type_name, "string");
        assert_eq!(components[0].attributes[0].description, "color tone");
    }

    #[test]
    fn test_missing_file() {
        let err = load_contracts(Path::new("/nonexistent/contracts.json")).unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/contracts.json"));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_manifest(&path), Err(ApiError::Json { .. })));
    }
}
