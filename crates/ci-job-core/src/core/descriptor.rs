// crates/ci-job-core/src/core/descriptor.rs
// ============================================================================
// Module: CI Job Descriptor
// Description: Canonical, immutable job descriptor for test-run submission.
// Purpose: Carry a validated job definition to the orchestration engine.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A [`JobDescriptor`] is only produced by normalization. Its fields are
//! private and exposed through read-only accessors, so a descriptor cannot be
//! altered after validation; any change means building a new one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::fields;
use crate::core::identifiers::AgentLabel;
use crate::core::identifiers::AmiImageId;
use crate::core::identifiers::BranchName;
use crate::core::identifiers::SplitName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Untyped job definition keyed by field name.
pub type RawRecord = Map<String, Value>;

/// Validated job descriptor.
///
/// The only serialized form is [`JobDescriptor::as_raw_record`].
///
/// # Invariants
/// - Required string fields are non-empty.
/// - `concurrent_builds >= 1` and `timeout_minutes >= 1`.
/// - `test_splits` entries are non-empty and distinct, in authored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Machine image identifier.
    pub(crate) ami_image_id: AmiImageId,
    /// Maximum concurrent builds.
    pub(crate) concurrent_builds: u32,
    /// Distribution name.
    pub(crate) distro_name: String,
    /// Distribution version.
    pub(crate) distro_version: String,
    /// Distribution architecture.
    pub(crate) distro_arch: String,
    /// Opaque build environment.
    pub(crate) environment: Map<String, Value>,
    /// Golden images branch.
    pub(crate) golden_images_branch: BranchName,
    /// Scheduler placement label.
    pub(crate) agent_label: AgentLabel,
    /// Test harness profile.
    pub(crate) test_environment_name: String,
    /// Harness passthrough arguments.
    pub(crate) passthrough_options: String,
    /// Python runtime selector.
    pub(crate) python_version: String,
    /// Test partitions.
    pub(crate) test_splits: Vec<SplitName>,
    /// Wall-clock budget in minutes.
    pub(crate) timeout_minutes: u32,
    /// Spot capacity flag.
    pub(crate) use_spot_instances: bool,
    /// Staged run flag.
    pub(crate) staged_test_run: bool,
}

impl JobDescriptor {
    /// Returns the machine image identifier.
    #[must_use]
    pub const fn ami_image_id(&self) -> &AmiImageId {
        &self.ami_image_id
    }

    /// Returns the maximum number of concurrent builds.
    #[must_use]
    pub const fn concurrent_builds(&self) -> u32 {
        self.concurrent_builds
    }

    /// Returns the distribution name.
    #[must_use]
    pub fn distro_name(&self) -> &str {
        &self.distro_name
    }

    /// Returns the distribution version.
    #[must_use]
    pub fn distro_version(&self) -> &str {
        &self.distro_version
    }

    /// Returns the distribution architecture.
    #[must_use]
    pub fn distro_arch(&self) -> &str {
        &self.distro_arch
    }

    /// Returns the build environment mapping.
    #[must_use]
    pub const fn environment(&self) -> &Map<String, Value> {
        &self.environment
    }

    /// Returns the golden images branch.
    #[must_use]
    pub const fn golden_images_branch(&self) -> &BranchName {
        &self.golden_images_branch
    }

    /// Returns the scheduler placement label.
    #[must_use]
    pub const fn agent_label(&self) -> &AgentLabel {
        &self.agent_label
    }

    /// Returns the test harness profile name.
    #[must_use]
    pub fn test_environment_name(&self) -> &str {
        &self.test_environment_name
    }

    /// Returns the harness passthrough arguments.
    #[must_use]
    pub fn passthrough_options(&self) -> &str {
        &self.passthrough_options
    }

    /// Returns the Python runtime selector.
    #[must_use]
    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    /// Returns the test partitions (empty when splitting is disabled).
    #[must_use]
    pub fn test_splits(&self) -> &[SplitName] {
        &self.test_splits
    }

    /// Returns the timeout in minutes.
    #[must_use]
    pub const fn timeout_minutes(&self) -> u32 {
        self.timeout_minutes
    }

    /// Returns whether spot capacity is requested.
    #[must_use]
    pub const fn use_spot_instances(&self) -> bool {
        self.use_spot_instances
    }

    /// Returns whether the staged fast/slow run mode is requested.
    #[must_use]
    pub const fn staged_test_run(&self) -> bool {
        self.staged_test_run
    }

    /// Returns every field, defaults included, as a raw record.
    ///
    /// Normalizing the returned record yields a descriptor equal to `self`.
    #[must_use]
    pub fn as_raw_record(&self) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert(fields::AMI_IMAGE_ID.to_string(), self.ami_image_id.as_str().into());
        record.insert(fields::CONCURRENT_BUILDS.to_string(), self.concurrent_builds.into());
        record.insert(fields::DISTRO_NAME.to_string(), self.distro_name.clone().into());
        record.insert(fields::DISTRO_VERSION.to_string(), self.distro_version.clone().into());
        record.insert(fields::DISTRO_ARCH.to_string(), self.distro_arch.clone().into());
        record.insert(fields::ENVIRONMENT.to_string(), Value::Object(self.environment.clone()));
        record.insert(
            fields::GOLDEN_IMAGES_BRANCH.to_string(),
            self.golden_images_branch.as_str().into(),
        );
        record.insert(fields::AGENT_LABEL.to_string(), self.agent_label.as_str().into());
        record.insert(
            fields::TEST_ENVIRONMENT_NAME.to_string(),
            self.test_environment_name.clone().into(),
        );
        record.insert(
            fields::PASSTHROUGH_OPTIONS.to_string(),
            self.passthrough_options.clone().into(),
        );
        record.insert(fields::PYTHON_VERSION.to_string(), self.python_version.clone().into());
        record.insert(
            fields::TEST_SPLITS.to_string(),
            Value::Array(self.test_splits.iter().map(|split| split.as_str().into()).collect()),
        );
        record.insert(fields::TIMEOUT_MINUTES.to_string(), self.timeout_minutes.into());
        record.insert(fields::USE_SPOT_INSTANCES.to_string(), self.use_spot_instances.into());
        record.insert(fields::STAGED_TEST_RUN.to_string(), self.staged_test_run.into());
        record
    }
}
