//! In-memory source loader for tests.
//!
//! Provides [`MockSourceLoader`] for assembling pages without filesystem access.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::loader::SourceLoader;

/// In-memory source loader.
///
/// # Example
///
/// ```ignore
/// use folio_site::MockSourceLoader;
///
/// let loader = MockSourceLoader::new().with_file("intro.md", "# Intro\n\n## Usage\n\nDo X");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockSourceLoader {
    files: HashMap<PathBuf, String>,
}

impl MockSourceLoader {
    /// Create an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl SourceLoader for MockSourceLoader {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found in mock loader", path.display()),
            )
        })
    }
}
