// crates/ci-job-config/src/config.rs
// ============================================================================
// Module: CI Job Definition Loading
// Description: Job definition file loading and environment capture.
// Purpose: Provide strict, fail-closed definition parsing with hard limits.
// Dependencies: ci-job-core, serde_json, toml
// ============================================================================

//! ## Overview
//! A job definition is loaded from a TOML or JSON file with strict size and
//! path limits, optionally enriched with captured build environment
//! variables, and then normalized into a [`JobDescriptor`]. Loading never
//! coerces or repairs values; anything malformed fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use ci_job_core::JobDescriptor;
use ci_job_core::NormalizeError;
use ci_job_core::RawRecord;
use ci_job_core::core::fields::ENVIRONMENT;
use ci_job_core::normalize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default definition filename when no path is specified.
pub const DEFAULT_DEFINITION_NAME: &str = "ci-job.toml";
/// Environment variable used to override the definition path.
pub const DEFINITION_ENV_VAR: &str = "CI_JOB_DEFINITION";
/// Maximum definition file size in bytes.
pub const MAX_DEFINITION_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of captured environment variables.
pub const MAX_CAPTURED_VARIABLES: usize = 256;
/// Maximum size of a single captured environment value in bytes.
pub const MAX_CAPTURED_VALUE_BYTES: usize = 8 * 1024;

// ============================================================================
// SECTION: Definition Format
// ============================================================================

/// Supported definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// TOML document (default).
    Toml,
    /// JSON document.
    Json,
}

impl DefinitionFormat {
    /// Selects the format from a file extension; anything but `.json` is TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

// ============================================================================
// SECTION: Environment Capture
// ============================================================================

/// Prefix filter selecting build environment variables to capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentCapture {
    /// Variable name prefixes to capture.
    prefixes: Vec<String>,
}

impl EnvironmentCapture {
    /// Creates a capture filter from name prefixes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no prefix is given or a prefix is empty.
    pub fn new<I, S>(prefixes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        if prefixes.is_empty() {
            return Err(ConfigError::Invalid(
                "environment capture requires at least one prefix".to_string(),
            ));
        }
        if prefixes.iter().any(|prefix| prefix.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "environment capture prefix must be non-empty".to_string(),
            ));
        }
        Ok(Self {
            prefixes,
        })
    }

    /// Returns the configured prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns true when `name` starts with a configured prefix.
    fn matches(&self, name: &str) -> bool {
        self.prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Collects matching variables, sorted by name.
    fn collect<I>(&self, vars: I) -> Result<Map<String, Value>, ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut captured = BTreeMap::new();
        for (name, value) in vars {
            let (Ok(name), Ok(value)) = (name.into_string(), value.into_string()) else {
                continue;
            };
            if !self.matches(&name) {
                continue;
            }
            if value.len() > MAX_CAPTURED_VALUE_BYTES {
                return Err(ConfigError::Invalid(format!(
                    "environment variable {name} exceeds {MAX_CAPTURED_VALUE_BYTES} bytes"
                )));
            }
            captured.insert(name, Value::String(value));
        }
        if captured.len() > MAX_CAPTURED_VARIABLES {
            return Err(ConfigError::Invalid(format!(
                "captured environment exceeds {MAX_CAPTURED_VARIABLES} variables"
            )));
        }
        Ok(captured.into_iter().collect())
    }
}

// ============================================================================
// SECTION: Job Definition
// ============================================================================

/// Raw job definition as authored in a pipeline definition file.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDefinition {
    /// Untyped field values.
    record: RawRecord,
    /// File the definition was read from, when loaded from disk.
    source: Option<PathBuf>,
}

impl JobDefinition {
    /// Loads a definition from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_definition_path(path, env::var_os(DEFINITION_ENV_VAR))?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_DEFINITION_FILE_SIZE {
            return Err(ConfigError::Invalid("definition file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("definition file must be utf-8".to_string()))?;
        let mut definition = Self::parse(content, DefinitionFormat::from_path(&resolved))?;
        definition.source = Some(resolved);
        Ok(definition)
    }

    /// Parses a definition from in-memory text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is not a table/object document.
    pub fn parse(content: &str, format: DefinitionFormat) -> Result<Self, ConfigError> {
        let value: Value = match format {
            DefinitionFormat::Toml => {
                let table: toml::Table =
                    toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
                toml_to_json(toml::Value::Table(table))?
            }
            DefinitionFormat::Json => {
                serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?
            }
        };
        let Value::Object(record) = value else {
            return Err(ConfigError::Invalid("definition must be a table of fields".to_string()));
        };
        Ok(Self::from_record(record))
    }

    /// Wraps an already-built raw record.
    #[must_use]
    pub const fn from_record(record: RawRecord) -> Self {
        Self {
            record,
            source: None,
        }
    }

    /// Returns the raw field values.
    #[must_use]
    pub const fn record(&self) -> &RawRecord {
        &self.record
    }

    /// Returns the file the definition was loaded from.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Fills `environment` from the process environment when it was not authored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when captured values exceed limits.
    pub fn capture_environment(&mut self, capture: &EnvironmentCapture) -> Result<(), ConfigError> {
        self.capture_environment_from(capture, env::vars_os())
    }

    /// Fills `environment` from `vars` when it was not authored.
    ///
    /// Non-UTF-8 variables are skipped. An authored `environment` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when captured values exceed limits.
    pub fn capture_environment_from<I>(
        &mut self,
        capture: &EnvironmentCapture,
        vars: I,
    ) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        if self.record.get(ENVIRONMENT).is_some_and(|value| !value.is_null()) {
            return Ok(());
        }
        let captured = capture.collect(vars)?;
        self.record.insert(ENVIRONMENT.to_string(), Value::Object(captured));
        Ok(())
    }

    /// Normalizes the definition into a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Normalize`] when the definition is invalid.
    pub fn into_descriptor(self) -> Result<JobDescriptor, ConfigError> {
        Ok(normalize(&self.record)?)
    }
}

/// Loads, optionally enriches, and normalizes a job definition.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading, capture, or normalization fails.
pub fn load_descriptor(
    path: Option<&Path>,
    capture: Option<&EnvironmentCapture>,
) -> Result<JobDescriptor, ConfigError> {
    let mut definition = JobDefinition::load(path)?;
    if let Some(capture) = capture {
        definition.capture_environment(capture)?;
    }
    definition.into_descriptor()
}

/// Resolves the definition path: explicit path, then `env_value`, then the default name.
///
/// `env_value` is the value of [`DEFINITION_ENV_VAR`], when set.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the environment path exceeds the length limit.
pub fn resolve_definition_path(
    path: Option<&Path>,
    env_value: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env_value {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("definition path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_DEFINITION_NAME))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Job definition loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading the definition.
    #[error("definition io error: {0}")]
    Io(String),
    /// TOML or JSON parsing error.
    #[error("definition parse error: {0}")]
    Parse(String),
    /// Invalid definition input.
    #[error("invalid definition: {0}")]
    Invalid(String),
    /// Field-level validation failure.
    #[error("invalid job descriptor: {0}")]
    Normalize(#[from] NormalizeError),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a parsed TOML value into JSON.
///
/// Datetimes become their RFC 3339 text; non-finite floats are rejected.
fn toml_to_json(value: toml::Value) -> Result<Value, ConfigError> {
    Ok(match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(number) => Value::from(number),
        toml::Value::Float(number) => serde_json::Number::from_f64(number)
            .map(Value::Number)
            .ok_or_else(|| ConfigError::Invalid(format!("non-finite float: {number}")))?,
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_to_json).collect::<Result<_, _>>()?)
        }
        toml::Value::Table(table) => {
            let mut object = Map::new();
            for (key, item) in table {
                object.insert(key, toml_to_json(item)?);
            }
            Value::Object(object)
        }
    })
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("definition path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("definition path component too long".to_string()));
        }
    }
    Ok(())
}
