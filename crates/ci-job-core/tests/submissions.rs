// crates/ci-job-core/tests/submissions.rs
// =============================================================================
// Module: Builder and Submission Tests
// Description: Validate the typed builder and the submission contract.
// Purpose: Ensure builder-made descriptors share normalization rules and reach
//          submitters intact.
// =============================================================================

//! Builder and submitter tests for ci-job-core.

use ci_job_core::InMemorySubmitter;
use ci_job_core::JobDescriptor;
use ci_job_core::JobDescriptorBuilder;
use ci_job_core::NormalizeError;
use ci_job_core::RunResult;
use ci_job_core::RunStatus;
use ci_job_core::TestRunSubmitter;
use ci_job_core::normalize;
use serde_json::Map;
use serde_json::json;

mod common;

type TestResult = Result<(), String>;

/// Builder preloaded with the FreeBSD job fields.
fn freebsd_builder() -> JobDescriptorBuilder {
    let mut environment = Map::new();
    environment.insert("BRANCH_NAME".to_string(), json!("master"));
    environment.insert("BUILD_NUMBER".to_string(), json!("1742"));
    JobDescriptorBuilder::new()
        .ami_image_id("ami-0f8692a4a769c17e4")
        .concurrent_builds(1)
        .distro("freebsd", "122", "amd64")
        .environment(environment)
        .golden_images_branch("master")
        .agent_label("kitchen-slave")
        .test_environment_name("pytest-zeromq")
        .passthrough_options("--ssh-tests")
        .python_version("py3")
        .timeout_minutes(360)
        .use_spot_instances(true)
}

#[test]
fn builder_matches_raw_record_normalization() -> TestResult {
    let built = freebsd_builder().build().map_err(|err| err.to_string())?;
    let loaded = normalize(&common::freebsd_record()).map_err(|err| err.to_string())?;
    if built != loaded {
        return Err("builder and raw record produced different descriptors".to_string());
    }
    Ok(())
}

#[test]
fn builder_shares_range_checks() -> TestResult {
    match freebsd_builder().timeout_minutes(0).build() {
        Err(NormalizeError::InvalidRange {
            field,
            value: 0,
        }) if field == "timeoutMinutes" => Ok(()),
        other => Err(format!("expected timeout range error, got {:?}", other.map(|_| ()))),
    }
}

#[test]
fn builder_rejects_duplicate_splits() -> TestResult {
    match freebsd_builder().test_splits(["unit", "unit"]).build() {
        Err(NormalizeError::DuplicateSplit(name)) if name == "unit" => Ok(()),
        other => Err(format!("expected duplicate split error, got {:?}", other.map(|_| ()))),
    }
}

#[test]
fn builder_requires_every_field() -> TestResult {
    match JobDescriptorBuilder::new().build() {
        Err(NormalizeError::MissingField(name)) if name == "amiImageId" => Ok(()),
        other => Err(format!("expected missing field error, got {:?}", other.map(|_| ()))),
    }
}

#[test]
fn submitter_receives_descriptor_once() -> TestResult {
    let descriptor = freebsd_builder().build().map_err(|err| err.to_string())?;
    let expected: JobDescriptor = descriptor.clone();
    let submitter = InMemorySubmitter::new();
    let result = submitter.submit(descriptor).map_err(|err| err.to_string())?;
    if result.status != RunStatus::Accepted {
        return Err("default submitter should accept".to_string());
    }
    let submissions = submitter.submissions().map_err(|err| err.to_string())?;
    if submissions != vec![expected] {
        return Err("submitter did not record the descriptor".to_string());
    }
    Ok(())
}

#[test]
fn submitter_returns_configured_result() -> TestResult {
    let submitter = InMemorySubmitter::with_result(RunResult {
        status: RunStatus::Failed,
        reference: Some("run-17".to_string()),
    });
    let descriptor = freebsd_builder().build().map_err(|err| err.to_string())?;
    let result = submitter.submit(descriptor).map_err(|err| err.to_string())?;
    if result.status != RunStatus::Failed || result.reference.as_deref() != Some("run-17") {
        return Err("configured result not returned".to_string());
    }
    Ok(())
}
