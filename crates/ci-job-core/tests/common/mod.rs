// crates/ci-job-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for job descriptor tests.
// Purpose: Reduce duplication across integration tests for ci-job-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use ci_job_core::RawRecord;
use serde_json::Value;
use serde_json::json;

/// Returns the FreeBSD 12.2 amd64 job definition as a raw record.
pub fn freebsd_record() -> RawRecord {
    let value = json!({
        "amiImageId": "ami-0f8692a4a769c17e4",
        "concurrentBuilds": 1,
        "distroName": "freebsd",
        "distroVersion": "122",
        "distroArch": "amd64",
        "environment": { "BRANCH_NAME": "master", "BUILD_NUMBER": "1742" },
        "goldenImagesBranch": "master",
        "agentLabel": "kitchen-slave",
        "testEnvironmentName": "pytest-zeromq",
        "passthroughOptions": "--ssh-tests",
        "pythonVersion": "py3",
        "timeoutMinutes": 360,
        "useSpotInstances": true
    });
    match value {
        Value::Object(record) => record,
        _ => RawRecord::new(),
    }
}

/// Returns the FreeBSD record with `name` replaced by `value`.
pub fn record_with(name: &str, value: Value) -> RawRecord {
    let mut record = freebsd_record();
    record.insert(name.to_string(), value);
    record
}

/// Returns the FreeBSD record without `name`.
pub fn record_without(name: &str) -> RawRecord {
    let mut record = freebsd_record();
    record.remove(name);
    record
}
