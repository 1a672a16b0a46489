// crates/ci-job-core/src/runtime/builder.rs
// ============================================================================
// Module: CI Job Descriptor Builder
// Description: Typed builder for job descriptors.
// Purpose: Construct descriptors from Rust code through the normalization path.
// Dependencies: crate::{core, runtime::normalize}, serde_json
// ============================================================================

//! ## Overview
//! The builder collects typed values and assembles a raw record on
//! [`JobDescriptorBuilder::build`], which then runs [`normalize`]. There is no
//! second validation path: a builder-made descriptor obeys exactly the same
//! rules as one loaded from a pipeline definition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::JobDescriptor;
use crate::core::NormalizeError;
use crate::core::RawRecord;
use crate::core::fields;
use crate::runtime::normalize::normalize;

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Typed builder for [`JobDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct JobDescriptorBuilder {
    /// Fields set so far, keyed by raw-record name.
    record: RawRecord,
}

impl JobDescriptorBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a field value.
    fn set(mut self, name: &str, value: Value) -> Self {
        self.record.insert(name.to_string(), value);
        self
    }

    /// Sets the machine image identifier.
    #[must_use]
    pub fn ami_image_id(self, value: impl Into<String>) -> Self {
        self.set(fields::AMI_IMAGE_ID, Value::String(value.into()))
    }

    /// Sets the maximum number of concurrent builds.
    #[must_use]
    pub fn concurrent_builds(self, value: u32) -> Self {
        self.set(fields::CONCURRENT_BUILDS, value.into())
    }

    /// Sets the target distribution name, version, and architecture.
    #[must_use]
    pub fn distro(
        self,
        name: impl Into<String>,
        version: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        self.set(fields::DISTRO_NAME, Value::String(name.into()))
            .set(fields::DISTRO_VERSION, Value::String(version.into()))
            .set(fields::DISTRO_ARCH, Value::String(arch.into()))
    }

    /// Sets the opaque build environment.
    #[must_use]
    pub fn environment(self, value: Map<String, Value>) -> Self {
        self.set(fields::ENVIRONMENT, Value::Object(value))
    }

    /// Sets the golden images branch.
    #[must_use]
    pub fn golden_images_branch(self, value: impl Into<String>) -> Self {
        self.set(fields::GOLDEN_IMAGES_BRANCH, Value::String(value.into()))
    }

    /// Sets the scheduler placement label.
    #[must_use]
    pub fn agent_label(self, value: impl Into<String>) -> Self {
        self.set(fields::AGENT_LABEL, Value::String(value.into()))
    }

    /// Sets the test harness profile.
    #[must_use]
    pub fn test_environment_name(self, value: impl Into<String>) -> Self {
        self.set(fields::TEST_ENVIRONMENT_NAME, Value::String(value.into()))
    }

    /// Sets the harness passthrough arguments.
    #[must_use]
    pub fn passthrough_options(self, value: impl Into<String>) -> Self {
        self.set(fields::PASSTHROUGH_OPTIONS, Value::String(value.into()))
    }

    /// Sets the Python runtime selector.
    #[must_use]
    pub fn python_version(self, value: impl Into<String>) -> Self {
        self.set(fields::PYTHON_VERSION, Value::String(value.into()))
    }

    /// Sets the test partitions.
    #[must_use]
    pub fn test_splits<I, S>(self, splits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = splits.into_iter().map(|split| Value::String(split.into())).collect();
        self.set(fields::TEST_SPLITS, Value::Array(entries))
    }

    /// Sets the timeout in minutes.
    #[must_use]
    pub fn timeout_minutes(self, value: u32) -> Self {
        self.set(fields::TIMEOUT_MINUTES, value.into())
    }

    /// Requests spot capacity.
    #[must_use]
    pub fn use_spot_instances(self, value: bool) -> Self {
        self.set(fields::USE_SPOT_INSTANCES, Value::Bool(value))
    }

    /// Requests the staged fast/slow run mode.
    #[must_use]
    pub fn staged_test_run(self, value: bool) -> Self {
        self.set(fields::STAGED_TEST_RUN, Value::Bool(value))
    }

    /// Validates the collected fields and builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError`] when a required field is missing or a value
    /// violates its constraints.
    pub fn build(&self) -> Result<JobDescriptor, NormalizeError> {
        normalize(&self.record)
    }
}
