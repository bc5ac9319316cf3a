//! Writing artifacts to disk, or checking them against what is there.

use std::path::Path;

use rayon::prelude::*;

use crate::artifacts::ArtifactSet;
use crate::error::BuildError;

/// What [`persist`] does with the artifacts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistMode {
    /// Write artifacts whose contents changed.
    #[default]
    Write,
    /// Compare artifacts byte-for-byte without writing.
    Check,
}

/// Outcome of a successful [`persist`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PersistReport {
    /// Files written (always 0 in check mode).
    pub written: usize,
    /// Files already up to date.
    pub unchanged: usize,
}

/// Persist artifacts under `output_dir`.
///
/// Artifacts have distinct paths, so they are processed in parallel. Check
/// mode reports every stale or missing file at once.
pub fn persist(
    output_dir: &Path,
    artifacts: &ArtifactSet,
    mode: PersistMode,
) -> Result<PersistReport, BuildError> {
    match mode {
        PersistMode::Write => write_all(output_dir, artifacts),
        PersistMode::Check => check_all(output_dir, artifacts),
    }
}

fn write_all(output_dir: &Path, artifacts: &ArtifactSet) -> Result<PersistReport, BuildError> {
    let outcomes: Vec<bool> = artifacts
        .files()
        .par_iter()
        .map(|(relative, contents)| write_one(&output_dir.join(relative), contents))
        .collect::<Result<_, _>>()?;

    let written = outcomes.iter().filter(|&&written| written).count();
    Ok(PersistReport {
        written,
        unchanged: outcomes.len() - written,
    })
}

/// Write one file unless it already holds `contents`. Returns whether it wrote.
fn write_one(path: &Path, contents: &str) -> Result<bool, BuildError> {
    if std::fs::read(path).is_ok_and(|existing| existing == contents.as_bytes()) {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| BuildError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Wrote artifact");
    Ok(true)
}

fn check_all(output_dir: &Path, artifacts: &ArtifactSet) -> Result<PersistReport, BuildError> {
    let mut stale: Vec<String> = artifacts
        .files()
        .par_iter()
        .filter(|(relative, contents)| {
            !std::fs::read(output_dir.join(relative.as_str()))
                .is_ok_and(|existing| existing == contents.as_bytes())
        })
        .map(|(relative, _)| relative.clone())
        .collect();

    if stale.is_empty() {
        return Ok(PersistReport {
            written: 0,
            unchanged: artifacts.len(),
        });
    }
    stale.sort();
    for path in &stale {
        tracing::debug!(path = %path, "Stale artifact");
    }
    Err(BuildError::Stale { paths: stale })
}
