//! Error types for loading component metadata.

use std::path::PathBuf;

/// Error reading a metadata source.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON for its format.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
