//! Generated artifacts and their serialized shapes.

use std::collections::BTreeMap;

use folio_api::ComponentApiEntity;
use folio_site::PageMeta;
use serde::Serialize;

use crate::error::BuildError;

/// Relative path of the component API model.
pub const API_PATH: &str = "api.json";
/// Relative path of the page manifest.
pub const MANIFEST_PATH: &str = "docs-manifest.json";
/// Relative path of the component page list.
pub const COMPONENTS_PATH: &str = "docs-components.json";
/// Relative path of the search index.
pub const SEARCH_INDEX_PATH: &str = "docs-search-index.json";

/// Version of the `api.json` layout.
pub const API_SCHEMA_VERSION: u32 = 1;

/// Root of `api.json`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub schema_version: u32,
    pub packages: Vec<ApiPackage>,
}

/// One package of `api.json`.
#[derive(Clone, Debug, Serialize)]
pub struct ApiPackage {
    pub id: String,
    pub name: String,
    /// Contracts path as declared in the config.
    pub contracts: Option<String>,
    /// Custom elements manifest path as declared in the config.
    pub cem: Option<String>,
    pub components: Vec<ComponentApiEntity>,
}

impl ApiDocument {
    #[must_use]
    pub fn new(packages: Vec<ApiPackage>) -> Self {
        Self {
            schema: "schemas/api.schema.json".to_owned(),
            schema_version: API_SCHEMA_VERSION,
            packages,
        }
    }
}

/// Root of `docs-manifest.json`.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsManifest {
    pub docs_pages: Vec<PageMeta>,
    pub lab_pages: Vec<PageMeta>,
    pub component_page_ids: Vec<String>,
}

/// Root of `docs-components.json`.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentsDocument {
    pub component_pages: Vec<PageMeta>,
}

/// Serialize a value the way every artifact is written: pretty JSON with a
/// trailing newline.
pub fn to_json<T: Serialize + ?Sized>(path: &str, value: &T) -> Result<String, BuildError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| BuildError::Serialize {
        path: path.to_owned(),
        source,
    })?;
    json.push('\n');
    Ok(json)
}

/// Artifacts of a build, keyed by path relative to the output directory.
#[derive(Clone, Debug, Default)]
pub struct ArtifactSet {
    files: BTreeMap<String, String>,
}

impl ArtifactSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a JSON artifact. Fails if another artifact already uses `path`.
    pub fn insert_json<T: Serialize + ?Sized>(
        &mut self,
        path: impl Into<String>,
        value: &T,
    ) -> Result<(), BuildError> {
        let path = path.into();
        if self.files.contains_key(&path) {
            return Err(BuildError::DuplicatePage { path });
        }
        let contents = to_json(&path, value)?;
        tracing::debug!(path = %path, bytes = contents.len(), "Prepared artifact");
        self.files.insert(path, contents);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub(crate) fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }
}
