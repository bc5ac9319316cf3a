//! Build errors.

use std::path::PathBuf;

use folio_api::ApiError;
use folio_site::SiteError;

use crate::schema::SchemaValidationError;

/// Error returned when a build fails.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Site(#[from] SiteError),

    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },

    #[error("Two pages write to {path}")]
    DuplicatePage { path: String },

    /// Check mode found generated files that differ from a fresh build.
    #[error("{} generated file(s) are out of date; run the build without --check", paths.len())]
    Stale { paths: Vec<String> },
}
