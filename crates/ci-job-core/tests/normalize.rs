// crates/ci-job-core/tests/normalize.rs
// =============================================================================
// Module: Normalization Tests
// Description: Validate defaulting and rejection rules for job definitions.
// Purpose: Ensure malformed definitions fail locally with a precise cause.
// =============================================================================

//! Normalization scenario tests for ci-job-core.

use ci_job_core::FIELDS;
use ci_job_core::NormalizeError;
use ci_job_core::ValueKind;
use ci_job_core::normalize;
use serde_json::json;

mod common;

type TestResult = Result<(), String>;

/// Normalizes `record` and requires the given error.
fn expect_error(
    result: Result<ci_job_core::JobDescriptor, NormalizeError>,
    expected: &NormalizeError,
) -> TestResult {
    match result {
        Err(error) if &error == expected => Ok(()),
        Err(error) => Err(format!("expected {expected}, got {error}")),
        Ok(_) => Err(format!("expected {expected}, got a descriptor")),
    }
}

#[test]
fn freebsd_definition_normalizes_with_defaults() -> TestResult {
    let descriptor = normalize(&common::freebsd_record()).map_err(|err| err.to_string())?;
    if descriptor.ami_image_id().as_str() != "ami-0f8692a4a769c17e4" {
        return Err("ami image id not carried".to_string());
    }
    if descriptor.concurrent_builds() != 1 || descriptor.timeout_minutes() != 360 {
        return Err("integer fields not carried".to_string());
    }
    if descriptor.distro_name() != "freebsd"
        || descriptor.distro_version() != "122"
        || descriptor.distro_arch() != "amd64"
    {
        return Err("distro fields not carried".to_string());
    }
    if descriptor.agent_label().as_str() != "kitchen-slave"
        || descriptor.golden_images_branch().as_str() != "master"
    {
        return Err("placement fields not carried".to_string());
    }
    if descriptor.test_environment_name() != "pytest-zeromq"
        || descriptor.passthrough_options() != "--ssh-tests"
        || descriptor.python_version() != "py3"
    {
        return Err("harness fields not carried".to_string());
    }
    if !descriptor.use_spot_instances() {
        return Err("useSpotInstances should be true".to_string());
    }
    if !descriptor.test_splits().is_empty() {
        return Err("testSplits should default to empty".to_string());
    }
    if descriptor.staged_test_run() {
        return Err("stagedTestRun should default to false".to_string());
    }
    Ok(())
}

#[test]
fn environment_passes_through_unmodified() -> TestResult {
    let environment = json!({ "NESTED": { "list": [1, 2.5, null] }, "EMPTY": "" });
    let record = common::record_with("environment", environment.clone());
    let descriptor = normalize(&record).map_err(|err| err.to_string())?;
    if json!(descriptor.environment()) != environment {
        return Err("environment was altered".to_string());
    }
    Ok(())
}

#[test]
fn optional_fields_default_when_absent() -> TestResult {
    let mut record = common::record_without("passthroughOptions");
    record.remove("useSpotInstances");
    let descriptor = normalize(&record).map_err(|err| err.to_string())?;
    if !descriptor.passthrough_options().is_empty() {
        return Err("passthroughOptions should default to empty".to_string());
    }
    if descriptor.use_spot_instances() {
        return Err("useSpotInstances should default to false".to_string());
    }
    Ok(())
}

#[test]
fn null_optional_field_uses_default() -> TestResult {
    let record = common::record_with("stagedTestRun", json!(null));
    let descriptor = normalize(&record).map_err(|err| err.to_string())?;
    if descriptor.staged_test_run() {
        return Err("null stagedTestRun should default to false".to_string());
    }
    Ok(())
}

#[test]
fn missing_timeout_is_reported() -> TestResult {
    expect_error(
        normalize(&common::record_without("timeoutMinutes")),
        &NormalizeError::MissingField("timeoutMinutes".to_string()),
    )
}

#[test]
fn each_missing_required_field_is_named() -> TestResult {
    for field in FIELDS.iter().filter(|field| field.is_required()) {
        expect_error(
            normalize(&common::record_without(field.name)),
            &NormalizeError::MissingField(field.name.to_string()),
        )?;
    }
    Ok(())
}

#[test]
fn null_required_field_is_missing() -> TestResult {
    expect_error(
        normalize(&common::record_with("agentLabel", json!(null))),
        &NormalizeError::MissingField("agentLabel".to_string()),
    )
}

#[test]
fn zero_timeout_is_out_of_range() -> TestResult {
    expect_error(
        normalize(&common::record_with("timeoutMinutes", json!(0))),
        &NormalizeError::InvalidRange {
            field: "timeoutMinutes".to_string(),
            value: 0,
        },
    )
}

#[test]
fn negative_timeout_is_out_of_range() -> TestResult {
    expect_error(
        normalize(&common::record_with("timeoutMinutes", json!(-5))),
        &NormalizeError::InvalidRange {
            field: "timeoutMinutes".to_string(),
            value: -5,
        },
    )
}

#[test]
fn zero_concurrent_builds_is_out_of_range() -> TestResult {
    expect_error(
        normalize(&common::record_with("concurrentBuilds", json!(0))),
        &NormalizeError::InvalidRange {
            field: "concurrentBuilds".to_string(),
            value: 0,
        },
    )
}

#[test]
fn oversized_integer_is_out_of_range() -> TestResult {
    expect_error(
        normalize(&common::record_with("concurrentBuilds", json!(u64::MAX))),
        &NormalizeError::InvalidRange {
            field: "concurrentBuilds".to_string(),
            value: i128::from(u64::MAX),
        },
    )
}

#[test]
fn float_timeout_is_type_mismatch() -> TestResult {
    expect_error(
        normalize(&common::record_with("timeoutMinutes", json!(360.0))),
        &NormalizeError::TypeMismatch {
            field: "timeoutMinutes".to_string(),
            expected: "integer",
            actual: ValueKind::Float,
        },
    )
}

#[test]
fn numeric_string_is_not_coerced() -> TestResult {
    expect_error(
        normalize(&common::record_with("concurrentBuilds", json!("2"))),
        &NormalizeError::TypeMismatch {
            field: "concurrentBuilds".to_string(),
            expected: "integer",
            actual: ValueKind::String,
        },
    )
}

#[test]
fn string_flag_is_type_mismatch() -> TestResult {
    expect_error(
        normalize(&common::record_with("useSpotInstances", json!("true"))),
        &NormalizeError::TypeMismatch {
            field: "useSpotInstances".to_string(),
            expected: "boolean",
            actual: ValueKind::String,
        },
    )
}

#[test]
fn non_mapping_environment_is_type_mismatch() -> TestResult {
    expect_error(
        normalize(&common::record_with("environment", json!(["BRANCH_NAME"]))),
        &NormalizeError::TypeMismatch {
            field: "environment".to_string(),
            expected: "mapping",
            actual: ValueKind::Sequence,
        },
    )
}

#[test]
fn blank_required_string_is_rejected() -> TestResult {
    expect_error(
        normalize(&common::record_with("amiImageId", json!("   "))),
        &NormalizeError::EmptyField("amiImageId".to_string()),
    )
}

#[test]
fn duplicate_split_is_named() -> TestResult {
    expect_error(
        normalize(&common::record_with("testSplits", json!(["unit", "unit"]))),
        &NormalizeError::DuplicateSplit("unit".to_string()),
    )
}

#[test]
fn empty_split_is_rejected() -> TestResult {
    expect_error(
        normalize(&common::record_with("testSplits", json!(["unit", ""]))),
        &NormalizeError::EmptySplitName,
    )
}

#[test]
fn non_string_split_reports_index() -> TestResult {
    expect_error(
        normalize(&common::record_with("testSplits", json!(["unit", 3]))),
        &NormalizeError::TypeMismatch {
            field: "testSplits[1]".to_string(),
            expected: "string",
            actual: ValueKind::Integer,
        },
    )
}

#[test]
fn splits_keep_authored_order() -> TestResult {
    let record = common::record_with("testSplits", json!(["unit", "integration", "scenarios"]));
    let descriptor = normalize(&record).map_err(|err| err.to_string())?;
    let names: Vec<&str> = descriptor.test_splits().iter().map(|split| split.as_str()).collect();
    if names != ["unit", "integration", "scenarios"] {
        return Err(format!("unexpected split order: {names:?}"));
    }
    Ok(())
}

#[test]
fn splits_and_staged_run_are_independent() -> TestResult {
    let mut record = common::record_with("testSplits", json!(["fast", "slow"]));
    record.insert("stagedTestRun".to_string(), json!(true));
    let descriptor = normalize(&record).map_err(|err| err.to_string())?;
    if descriptor.test_splits().len() != 2 || !descriptor.staged_test_run() {
        return Err("splits and staged run should both be carried".to_string());
    }
    Ok(())
}

#[test]
fn misspelled_optional_field_is_unknown() -> TestResult {
    expect_error(
        normalize(&common::record_with("useSpotInstance", json!(true))),
        &NormalizeError::UnknownField("useSpotInstance".to_string()),
    )
}

#[test]
fn error_reports_field_and_kind() -> TestResult {
    let error = NormalizeError::DuplicateSplit("unit".to_string());
    if error.field() != "testSplits" || error.kind() != "duplicate_split" {
        return Err(format!("unexpected field/kind: {} {}", error.field(), error.kind()));
    }
    let error = NormalizeError::InvalidRange {
        field: "timeoutMinutes".to_string(),
        value: 0,
    };
    if error.to_string() != "value out of range for timeoutMinutes: 0" {
        return Err(format!("unexpected message: {error}"));
    }
    Ok(())
}

#[test]
fn raw_record_projection_lists_every_field_once() -> TestResult {
    let descriptor = normalize(&common::freebsd_record()).map_err(|err| err.to_string())?;
    let record = descriptor.as_raw_record();
    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    let mut expected: Vec<&str> = FIELDS.iter().map(|field| field.name).collect();
    expected.sort_unstable();
    let mut actual = keys.clone();
    actual.sort_unstable();
    if actual != expected {
        return Err(format!("projection keys differ: {keys:?}"));
    }
    if record.get("testSplits") != Some(&json!([]))
        || record.get("stagedTestRun") != Some(&json!(false))
    {
        return Err("defaults missing from projection".to_string());
    }
    Ok(())
}
