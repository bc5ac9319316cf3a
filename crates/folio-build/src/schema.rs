//! JSON Schema validation of build inputs and outputs.

use std::fmt::Write;
use std::path::Path;

use serde_json::Value;

use crate::error::BuildError;

const API_SCHEMA: &str = include_str!("../schemas/api.schema.json");
const MANIFEST_SCHEMA: &str = include_str!("../schemas/manifest.schema.json");

/// Error returned when a document does not match its schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// The schema itself cannot be compiled.
    #[error("Invalid schema for {subject}: {message}")]
    InvalidSchema { subject: String, message: String },

    /// The document violates the schema. Holds every violation found.
    #[error("{subject} does not match its schema:{}", format_errors(errors))]
    Invalid {
        subject: String,
        errors: Vec<String>,
    },
}

fn format_errors(errors: &[String]) -> String {
    let mut out = String::new();
    for error in errors {
        write!(out, "\n  {error}").unwrap();
    }
    out
}

/// Validate `document` against `schema`, collecting every violation as
/// `instance path: message`.
pub fn validate(document: &Value, schema: &Value, subject: &str) -> Result<(), SchemaValidationError> {
    let validator =
        jsonschema::validator_for(schema).map_err(|error| SchemaValidationError::InvalidSchema {
            subject: subject.to_owned(),
            message: error.to_string(),
        })?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|error| {
            let path = error.instance_path.to_string();
            let path = if path.is_empty() { "/".to_owned() } else { path };
            format!("{path}: {error}")
        })
        .collect();

    if errors.is_empty() {
        tracing::debug!(subject, "Schema validation passed");
        return Ok(());
    }
    Err(SchemaValidationError::Invalid {
        subject: subject.to_owned(),
        errors,
    })
}

/// Schemas used by a build.
#[derive(Clone, Debug)]
pub struct Schemas {
    pub api: Value,
    pub manifest: Value,
}

impl Schemas {
    /// Load schema overrides, using the embedded schema where none is given.
    pub fn load(api: Option<&Path>, manifest: Option<&Path>) -> Result<Self, BuildError> {
        Ok(Self {
            api: load_schema(api, API_SCHEMA, "schemas/api.schema.json")?,
            manifest: load_schema(manifest, MANIFEST_SCHEMA, "schemas/manifest.schema.json")?,
        })
    }
}

fn load_schema(path: Option<&Path>, embedded: &str, embedded_name: &str) -> Result<Value, BuildError> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading schema override");
            crate::read_json_value(path)
        }
        None => serde_json::from_str(embedded).map_err(|source| BuildError::Json {
            path: embedded_name.into(),
            source,
        }),
    }
}
