//! CLI error types.

use folio_build::BuildError;
use folio_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Build(#[from] BuildError),
}

impl CliError {
    /// Paths reported by a failed check, in sorted order.
    pub(crate) fn stale_paths(&self) -> &[String] {
        match self {
            Self::Build(BuildError::Stale { paths }) => paths,
            _ => &[],
        }
    }
}
