// crates/ci-job-config/src/examples.rs
// ============================================================================
// Module: Job Definition Examples
// Description: Canonical example job definitions.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for a job definition: the FreeBSD 12.2 amd64 pytest job.
//! Optional features that are switched off stay visible as commented keys so
//! authors can see every field and its default.

/// Returns a canonical example `ci-job.toml` definition.
#[must_use]
pub fn job_toml_example() -> String {
    String::from(
        r#"amiImageId = "ami-0f8692a4a769c17e4"
concurrentBuilds = 1
distroName = "freebsd"
distroVersion = "122"
distroArch = "amd64"
goldenImagesBranch = "master"
agentLabel = "kitchen-slave"
testEnvironmentName = "pytest-zeromq"
passthroughOptions = "--ssh-tests"
pythonVersion = "py3"
timeoutMinutes = 360
useSpotInstances = true
# testSplits = ["unit", "integration"]
# stagedTestRun = false

[environment]
BRANCH_NAME = "master"
"#,
    )
}
