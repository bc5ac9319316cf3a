//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ## Path Expansion
//!
//! Path values support environment variable and home directory expansion
//! before they are resolved against the config file's directory:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - `~/path` - expands to a path under the home directory
//!
//! Expanded fields:
//! - `docs.source_dir`, `docs.manifest`, `docs.output_dir`
//! - `packages[].contracts`, `packages[].cem`
//! - `schemas.api`, `schemas.manifest`

mod expand;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Component packages (relative strings from TOML).
    packages: Vec<PackageConfigRaw>,
    /// Schema overrides (relative strings from TOML).
    schemas: SchemasConfigRaw,
    /// Preview markup per component tag.
    pub previews: BTreeMap<String, String>,
    /// Explicit component tag to gallery group lookups.
    pub taxonomy: BTreeMap<String, String>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved packages (set after loading).
    #[serde(skip)]
    pub packages_resolved: Vec<PackageConfig>,
    /// Resolved schema overrides (set after loading).
    #[serde(skip)]
    pub schemas_resolved: SchemasConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    manifest: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DocsConfig {
    /// Root directory of markdown sources.
    pub source_dir: PathBuf,
    /// Page manifest JSON file.
    pub manifest: PathBuf,
    /// Directory generated artifacts are written to.
    pub output_dir: PathBuf,
}

/// Raw package configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PackageConfigRaw {
    id: String,
    name: Option<String>,
    contracts: Option<String>,
    cem: Option<String>,
}

/// A metadata file path as declared in the config and as resolved on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePath {
    /// Path as written in `folio.toml`, used in generated artifacts.
    pub declared: String,
    /// Absolute path read by the build.
    pub resolved: PathBuf,
}

/// Resolved component package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageConfig {
    /// Package id used by `package` filters in the page manifest.
    pub id: String,
    /// Display name, defaults to the id.
    pub name: String,
    /// Hand-authored contracts JSON.
    pub contracts: Option<SourcePath>,
    /// Custom elements manifest JSON.
    pub cem: Option<SourcePath>,
}

/// Raw schema overrides as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SchemasConfigRaw {
    api: Option<String>,
    manifest: Option<String>,
}

/// Resolved schema overrides. `None` selects the embedded schema.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SchemasConfig {
    pub api: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `folio.toml` in the current directory and parents, and
    /// falls back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default_with_cwd()),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                manifest: base.join("docs").join("manifest.json"),
                output_dir: base.join("generated"),
            },
            ..Self::default()
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_packages()?;
        self.validate_previews()?;
        Ok(())
    }

    fn validate_packages(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for package in &self.packages_resolved {
            require_non_empty(&package.id, "packages.id")?;
            if !seen.insert(package.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "packages.id {} is declared more than once",
                    package.id
                )));
            }
            if package.contracts.is_none() && package.cem.is_none() {
                return Err(ConfigError::Validation(format!(
                    "package {} needs contracts or cem",
                    package.id
                )));
            }
        }
        Ok(())
    }

    /// Preview markup is inserted into pages verbatim, so scripts are refused.
    fn validate_previews(&self) -> Result<(), ConfigError> {
        for (tag, markup) in &self.previews {
            require_non_empty(tag, "previews key")?;
            if markup.to_ascii_lowercase().contains("<script") {
                return Err(ConfigError::Validation(format!(
                    "previews.{tag} contains a <script> tag"
                )));
            }
        }
        Ok(())
    }

    /// Expand and resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |value: Option<&str>, field: &str| -> Result<Option<PathBuf>, ConfigError> {
            value
                .map(|value| expand::expand_path(value, field).map(|path| config_dir.join(path)))
                .transpose()
        };

        let source_dir = resolve(self.docs.source_dir.as_deref(), "docs.source_dir")?
            .unwrap_or_else(|| config_dir.join("docs"));
        let manifest = resolve(self.docs.manifest.as_deref(), "docs.manifest")?
            .unwrap_or_else(|| source_dir.join("manifest.json"));
        let output_dir = resolve(self.docs.output_dir.as_deref(), "docs.output_dir")?
            .unwrap_or_else(|| config_dir.join("generated"));
        self.docs_resolved = DocsConfig {
            source_dir,
            manifest,
            output_dir,
        };

        self.packages_resolved = self
            .packages
            .iter()
            .map(|package| {
                let source = |value: Option<&String>,
                              field: &str|
                 -> Result<Option<SourcePath>, ConfigError> {
                    value
                        .map(|declared| {
                            expand::expand_path(declared, field).map(|path| SourcePath {
                                declared: declared.clone(),
                                resolved: config_dir.join(path),
                            })
                        })
                        .transpose()
                };
                Ok(PackageConfig {
                    id: package.id.clone(),
                    name: package
                        .name
                        .clone()
                        .filter(|name| !name.trim().is_empty())
                        .unwrap_or_else(|| package.id.clone()),
                    contracts: source(package.contracts.as_ref(), "packages.contracts")?,
                    cem: source(package.cem.as_ref(), "packages.cem")?,
                })
            })
            .collect::<Result<_, ConfigError>>()?;

        self.schemas_resolved = SchemasConfig {
            api: resolve(self.schemas.api.as_deref(), "schemas.api")?,
            manifest: resolve(self.schemas.manifest.as_deref(), "schemas.manifest")?,
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.docs_resolved,
            DocsConfig {
                source_dir: PathBuf::from("/test/docs"),
                manifest: PathBuf::from("/test/docs/manifest.json"),
                output_dir: PathBuf::from("/test/generated"),
            }
        );
        assert!(config.packages_resolved.is_empty());
        assert_eq!(config.schemas_resolved, SchemasConfig::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        assert_eq!(
            config.docs_resolved.manifest,
            PathBuf::from("/project/docs/manifest.json")
        );
        assert!(config.previews.is_empty());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "content"
output_dir = "site/generated"

[[packages]]
id = "core"
name = "@acme/core"
contracts = "packages/core/contracts.json"
cem = "packages/core/custom-elements.json"

[[packages]]
id = "labs"
cem = "packages/labs/custom-elements.json"

[schemas]
api = "schemas/api.schema.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/content"));
        assert_eq!(
            config.docs_resolved.manifest,
            PathBuf::from("/project/content/manifest.json")
        );
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/site/generated")
        );
        assert_eq!(
            config.packages_resolved[0],
            PackageConfig {
                id: "core".to_owned(),
                name: "@acme/core".to_owned(),
                contracts: Some(SourcePath {
                    declared: "packages/core/contracts.json".to_owned(),
                    resolved: PathBuf::from("/project/packages/core/contracts.json"),
                }),
                cem: Some(SourcePath {
                    declared: "packages/core/custom-elements.json".to_owned(),
                    resolved: PathBuf::from("/project/packages/core/custom-elements.json"),
                }),
            }
        );
        assert_eq!(config.packages_resolved[1].name, "labs");
        assert!(config.packages_resolved[1].contracts.is_none());
        assert_eq!(
            config.schemas_resolved.api,
            Some(PathBuf::from("/project/schemas/api.schema.json"))
        );
        assert!(config.schemas_resolved.manifest.is_none());
    }

    #[test]
    fn test_parse_previews_and_taxonomy() {
        let toml = r#"
[previews]
"x-button" = "<x-button variant=\"primary\">Save</x-button>"

[taxonomy]
"x-spinner" = "feedback"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.previews["x-button"],
            "<x-button variant=\"primary\">Save</x-button>"
        );
        assert_eq!(config.taxonomy["x-spinner"], "feedback");
    }

    #[test]
    fn test_expand_env_in_paths() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_OUT", "build/out");
        }
        let toml = r#"
[docs]
output_dir = "${FOLIO_TEST_OUT}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/build/out")
        );
        unsafe {
            std::env::remove_var("FOLIO_TEST_OUT");
        }
    }

    #[test]
    fn test_duplicate_package_ids_rejected() {
        let toml = r#"
[[packages]]
id = "core"
cem = "a.json"

[[packages]]
id = "core"
cem = "b.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_package_without_sources_rejected() {
        let mut config: Config = toml::from_str("[[packages]]\nid = \"core\"\n").unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("contracts or cem"));
    }

    #[test]
    fn test_preview_script_rejected() {
        let toml = r#"
[previews]
"x-a" = "<x-a></x-a><SCRIPT>alert(1)</SCRIPT>"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("previews.x-a"));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[docs]\nsource_dir = \"pages\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("pages"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/folio.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[docs\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse(_))
        ));
    }
}
