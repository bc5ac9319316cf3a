//! Environment variable and home directory expansion for configuration paths.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - a leading `~` - expands to the home directory

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand environment variables, then a leading `~`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = expand_env(value, field)?;
    Ok(shellexpand::tilde(&expanded).into_owned())
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_SIMPLE", "hello");
        }
        let result = expand_env("${FOLIO_TEST_SIMPLE}", "docs.source_dir").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("FOLIO_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_UNSET");
        }
        let result = expand_env("${FOLIO_TEST_UNSET:-generated}", "docs.output_dir").unwrap();
        assert_eq!(result, "generated");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING");
        }
        let err = expand_env("${FOLIO_TEST_MISSING}/docs", "docs.source_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("FOLIO_TEST_MISSING"));
        assert!(err.to_string().contains("docs.source_dir"));
    }

    #[test]
    fn test_expand_embedded_var_in_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_PKG", "core");
        }
        let result = expand_path("packages/${FOLIO_TEST_PKG}/contracts.json", "packages.contracts")
            .unwrap();
        assert_eq!(result, "packages/core/contracts.json");
        unsafe {
            std::env::remove_var("FOLIO_TEST_PKG");
        }
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_path("docs", "docs.source_dir").unwrap(), "docs");
        assert_eq!(expand_env("$VAR", "docs.source_dir").unwrap(), "$VAR");
    }
}
