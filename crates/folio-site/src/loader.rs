//! Source file access for page assembly.

use std::io;
use std::path::{Path, PathBuf};

/// Reads markdown sources by path relative to the docs source directory.
///
/// Implementations must be `Send + Sync` so pages can be assembled in parallel.
pub trait SourceLoader: Send + Sync {
    /// Read a source file as UTF-8 text.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Path shown in diagnostics for `path`.
    fn display_path(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// Loader reading from a directory on disk.
#[derive(Clone, Debug)]
pub struct FsSourceLoader {
    root: PathBuf,
}

impl FsSourceLoader {
    /// Create a loader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceLoader for FsSourceLoader {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(path))
    }

    fn display_path(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_loader_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("guides")).unwrap();
        std::fs::write(dir.path().join("guides/setup.md"), "# Setup").unwrap();

        let loader = FsSourceLoader::new(dir.path());
        assert_eq!(loader.read(Path::new("guides/setup.md")).unwrap(), "# Setup");
        assert_eq!(
            loader.display_path(Path::new("guides/setup.md")),
            dir.path().join("guides/setup.md")
        );
    }

    #[test]
    fn test_fs_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsSourceLoader::new(dir.path())
            .read(Path::new("missing.md"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
