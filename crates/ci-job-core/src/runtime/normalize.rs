// crates/ci-job-core/src/runtime/normalize.rs
// ============================================================================
// Module: CI Job Normalization
// Description: Raw job definition validation and defaulting.
// Purpose: Convert an untyped record into an immutable job descriptor.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! [`normalize`] is a pure function: it reads the raw record, checks fields
//! in declaration order, substitutes constant defaults, and either returns a
//! fully populated [`JobDescriptor`] or the first [`NormalizeError`]. Nothing
//! partial escapes on failure.
//!
//! Coercion is strict. Strings come only from strings, integers only from
//! integral numbers, booleans only from booleans. A `null` value counts as
//! absent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Map;
use serde_json::Value;

use crate::core::AgentLabel;
use crate::core::AmiImageId;
use crate::core::BranchName;
use crate::core::FieldKind;
use crate::core::JobDescriptor;
use crate::core::NormalizeError;
use crate::core::RawRecord;
use crate::core::SplitName;
use crate::core::ValueKind;
use crate::core::fields;
use crate::core::fields::field_spec;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Validates a raw job definition and applies defaults.
///
/// # Errors
///
/// Returns [`NormalizeError`] for the first field that is missing, mistyped,
/// out of range, or unknown.
pub fn normalize(raw: &RawRecord) -> Result<JobDescriptor, NormalizeError> {
    let ami_image_id = AmiImageId::new(required_string(raw, fields::AMI_IMAGE_ID)?);
    let concurrent_builds =
        required_integer(raw, fields::CONCURRENT_BUILDS, fields::MIN_CONCURRENT_BUILDS)?;
    let distro_name = required_string(raw, fields::DISTRO_NAME)?;
    let distro_version = required_string(raw, fields::DISTRO_VERSION)?;
    let distro_arch = required_string(raw, fields::DISTRO_ARCH)?;
    let environment = required_mapping(raw, fields::ENVIRONMENT)?;
    let golden_images_branch = BranchName::new(required_string(raw, fields::GOLDEN_IMAGES_BRANCH)?);
    let agent_label = AgentLabel::new(required_string(raw, fields::AGENT_LABEL)?);
    let test_environment_name = required_string(raw, fields::TEST_ENVIRONMENT_NAME)?;
    let passthrough_options = optional_string(
        raw,
        fields::PASSTHROUGH_OPTIONS,
        fields::DEFAULT_PASSTHROUGH_OPTIONS,
    )?;
    let python_version = required_string(raw, fields::PYTHON_VERSION)?;
    let test_splits = optional_splits(raw)?;
    let timeout_minutes =
        required_integer(raw, fields::TIMEOUT_MINUTES, fields::MIN_TIMEOUT_MINUTES)?;
    let use_spot_instances =
        optional_bool(raw, fields::USE_SPOT_INSTANCES, fields::DEFAULT_USE_SPOT_INSTANCES)?;
    let staged_test_run =
        optional_bool(raw, fields::STAGED_TEST_RUN, fields::DEFAULT_STAGED_TEST_RUN)?;
    reject_unknown_fields(raw)?;

    Ok(JobDescriptor {
        ami_image_id,
        concurrent_builds,
        distro_name,
        distro_version,
        distro_arch,
        environment,
        golden_images_branch,
        agent_label,
        test_environment_name,
        passthrough_options,
        python_version,
        test_splits,
        timeout_minutes,
        use_spot_instances,
        staged_test_run,
    })
}

// ============================================================================
// SECTION: Field Readers
// ============================================================================

/// Returns the value for `name`, treating `null` as absent.
fn lookup<'a>(raw: &'a RawRecord, name: &str) -> Option<&'a Value> {
    raw.get(name).filter(|value| !value.is_null())
}

/// Builds a type mismatch error for a field value.
fn mismatch(field: &str, expected: FieldKind, value: &Value) -> NormalizeError {
    NormalizeError::TypeMismatch {
        field: field.to_string(),
        expected: expected.label(),
        actual: ValueKind::of(value),
    }
}

/// Reads a required, non-empty string field.
fn required_string(raw: &RawRecord, name: &str) -> Result<String, NormalizeError> {
    let value = lookup(raw, name).ok_or_else(|| NormalizeError::MissingField(name.to_string()))?;
    let Value::String(text) = value else {
        return Err(mismatch(name, FieldKind::String, value));
    };
    if text.trim().is_empty() {
        return Err(NormalizeError::EmptyField(name.to_string()));
    }
    Ok(text.clone())
}

/// Reads an optional string field; empty strings are accepted.
fn optional_string(
    raw: &RawRecord,
    name: &str,
    default: &str,
) -> Result<String, NormalizeError> {
    match lookup(raw, name) {
        None => Ok(default.to_string()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(value) => Err(mismatch(name, FieldKind::String, value)),
    }
}

/// Reads an optional boolean field.
fn optional_bool(raw: &RawRecord, name: &str, default: bool) -> Result<bool, NormalizeError> {
    match lookup(raw, name) {
        None => Ok(default),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(value) => Err(mismatch(name, FieldKind::Boolean, value)),
    }
}

/// Reads a required integer field bounded below by `minimum` and above by `u32::MAX`.
fn required_integer(raw: &RawRecord, name: &str, minimum: u32) -> Result<u32, NormalizeError> {
    let kind = FieldKind::Integer {
        minimum,
    };
    let value = lookup(raw, name).ok_or_else(|| NormalizeError::MissingField(name.to_string()))?;
    let Value::Number(number) = value else {
        return Err(mismatch(name, kind, value));
    };
    let integer = number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
        .ok_or_else(|| mismatch(name, kind, value))?;
    let out_of_range = || NormalizeError::InvalidRange {
        field: name.to_string(),
        value: integer,
    };
    let bounded = u32::try_from(integer).map_err(|_| out_of_range())?;
    if bounded < minimum {
        return Err(out_of_range());
    }
    Ok(bounded)
}

/// Reads the required build environment mapping without altering it.
fn required_mapping(raw: &RawRecord, name: &str) -> Result<Map<String, Value>, NormalizeError> {
    match lookup(raw, name) {
        None => Err(NormalizeError::MissingField(name.to_string())),
        Some(Value::Object(mapping)) => Ok(mapping.clone()),
        Some(value) => Err(mismatch(name, FieldKind::Mapping, value)),
    }
}

/// Reads the optional test split list, enforcing non-empty, distinct names.
fn optional_splits(raw: &RawRecord) -> Result<Vec<SplitName>, NormalizeError> {
    let name = fields::TEST_SPLITS;
    let Some(value) = lookup(raw, name) else {
        return Ok(Vec::new());
    };
    let Value::Array(entries) = value else {
        return Err(mismatch(name, FieldKind::StringList, value));
    };
    let mut seen = BTreeSet::new();
    let mut splits = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Value::String(split) = entry else {
            return Err(mismatch(&format!("{name}[{index}]"), FieldKind::String, entry));
        };
        if split.trim().is_empty() {
            return Err(NormalizeError::EmptySplitName);
        }
        if !seen.insert(split.as_str()) {
            return Err(NormalizeError::DuplicateSplit(split.clone()));
        }
        splits.push(SplitName::new(split.as_str()));
    }
    Ok(splits)
}

/// Rejects keys that are not declared job definition fields.
fn reject_unknown_fields(raw: &RawRecord) -> Result<(), NormalizeError> {
    match raw.keys().find(|key| field_spec(key).is_none()) {
        Some(key) => Err(NormalizeError::UnknownField(key.clone())),
        None => Ok(()),
    }
}
