//! Page assembly errors.

use std::path::PathBuf;

use folio_renderer::RenderError;

/// Error returned when a page cannot be assembled.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A markdown page has no `source`.
    #[error("Page {page} has no source file")]
    MissingSource { page: String },

    /// A source file could not be read.
    #[error("Failed to read {} for page {page}: {source}", path.display())]
    Source {
        page: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rendering a section failed.
    #[error("Failed to render page {page}: {source}")]
    Render { page: String, source: RenderError },

    /// A components page names a package that is not configured.
    #[error("Page {page} references unknown package {package}")]
    UnknownPackage { page: String, package: String },

    /// The entry type cannot be listed in the page manifest.
    #[error("Page {page} has type {page_type}, which is only used for generated pages")]
    UnsupportedType {
        page: String,
        page_type: &'static str,
    },
}
