// crates/ci-job-core/src/core/error.rs
// ============================================================================
// Module: CI Job Validation Errors
// Description: Error taxonomy for job definition normalization.
// Purpose: Surface the offending field and value for every rejected definition.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Normalization fails with exactly one [`NormalizeError`]. Every variant
//! names the field at fault so the definition author can fix it locally.
//! These errors indicate authoring defects and are never retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::core::fields::TEST_SPLITS;

// ============================================================================
// SECTION: Value Kinds
// ============================================================================

/// Observed kind of a raw-record value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// JSON null.
    Null,
    /// Boolean.
    Boolean,
    /// Integral number.
    Integer,
    /// Non-integral number.
    Float,
    /// String.
    String,
    /// Sequence.
    Sequence,
    /// Mapping.
    Mapping,
}

impl ValueKind {
    /// Classifies a raw-record value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(number) if number.is_i64() || number.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    /// Returns a stable label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Job definition normalization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A required field is absent (or null).
    #[error("missing required field: {0}")]
    MissingField(String),
    /// A field value has the wrong type.
    #[error("type mismatch for {field}: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Field name (sequence elements carry an index suffix).
        field: String,
        /// Declared type label.
        expected: &'static str,
        /// Observed value kind.
        actual: ValueKind,
    },
    /// An integer field is outside its accepted range.
    #[error("value out of range for {field}: {value}")]
    InvalidRange {
        /// Field name.
        field: String,
        /// Offending value.
        value: i128,
    },
    /// A test split name appears more than once.
    #[error("duplicate test split: {0}")]
    DuplicateSplit(String),
    /// A test split name is empty.
    #[error("empty test split name")]
    EmptySplitName,
    /// A required string field is empty.
    #[error("field must not be empty: {0}")]
    EmptyField(String),
    /// A key is not part of the job definition schema.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl NormalizeError {
    /// Returns the field the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField(field)
            | Self::EmptyField(field)
            | Self::UnknownField(field)
            | Self::TypeMismatch {
                field, ..
            }
            | Self::InvalidRange {
                field, ..
            } => field,
            Self::DuplicateSplit(_) | Self::EmptySplitName => TEST_SPLITS,
        }
    }

    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::TypeMismatch {
                ..
            } => "type_mismatch",
            Self::InvalidRange {
                ..
            } => "invalid_range",
            Self::DuplicateSplit(_) => "duplicate_split",
            Self::EmptySplitName => "empty_split_name",
            Self::EmptyField(_) => "empty_field",
            Self::UnknownField(_) => "unknown_field",
        }
    }
}
