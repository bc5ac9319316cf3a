//! Build orchestration for Folio.
//!
//! [`Builder`] loads the configured packages and pages, validates inputs and
//! the merged API model against JSON schemas, assembles every page and the
//! search index, then either writes the artifacts or checks them against the
//! output directory.
//!
//! Nothing is written unless every stage succeeds.

mod artifacts;
mod builder;
mod error;
mod persist;
mod schema;

use std::path::Path;

use folio_config::Config;
use serde_json::Value;

pub use artifacts::{
    API_PATH, API_SCHEMA_VERSION, ApiDocument, ApiPackage, ArtifactSet, COMPONENTS_PATH,
    ComponentsDocument, DocsManifest, MANIFEST_PATH, SEARCH_INDEX_PATH, to_json,
};
pub use builder::{BuildOptions, BuildReport, BuildStage, Builder};
pub use error::BuildError;
pub use persist::{PersistMode, PersistReport, persist};
pub use schema::{SchemaValidationError, Schemas, validate};

/// Run a full build for `config`.
pub fn build(config: &Config, options: BuildOptions) -> Result<BuildReport, BuildError> {
    Builder::new(config, options).run()
}

pub(crate) fn read_json_value(path: &Path) -> Result<Value, BuildError> {
    let content = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| BuildError::Json {
        path: path.to_path_buf(),
        source,
    })
}
