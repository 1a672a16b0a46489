// crates/ci-job-core/src/core/fields.rs
// ============================================================================
// Module: CI Job Field Table
// Description: Field names, kinds, and defaults for job definitions.
// Purpose: Single source of truth shared by normalization, schema, and docs.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Every raw-record key a job definition may carry is declared here once.
//! Normalization reads names and defaults from this table, and the generated
//! schema and docs walk [`FIELDS`] so the three never drift apart.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// SECTION: Field Names
// ============================================================================

/// Machine image identifier key.
pub const AMI_IMAGE_ID: &str = "amiImageId";
/// Concurrent builds key.
pub const CONCURRENT_BUILDS: &str = "concurrentBuilds";
/// Distribution name key.
pub const DISTRO_NAME: &str = "distroName";
/// Distribution version key.
pub const DISTRO_VERSION: &str = "distroVersion";
/// Distribution architecture key.
pub const DISTRO_ARCH: &str = "distroArch";
/// Build environment key.
pub const ENVIRONMENT: &str = "environment";
/// Golden images branch key.
pub const GOLDEN_IMAGES_BRANCH: &str = "goldenImagesBranch";
/// Agent label key.
pub const AGENT_LABEL: &str = "agentLabel";
/// Test environment name key.
pub const TEST_ENVIRONMENT_NAME: &str = "testEnvironmentName";
/// Passthrough options key.
pub const PASSTHROUGH_OPTIONS: &str = "passthroughOptions";
/// Python version key.
pub const PYTHON_VERSION: &str = "pythonVersion";
/// Test splits key.
pub const TEST_SPLITS: &str = "testSplits";
/// Timeout key.
pub const TIMEOUT_MINUTES: &str = "timeoutMinutes";
/// Spot instance key.
pub const USE_SPOT_INSTANCES: &str = "useSpotInstances";
/// Staged test run key.
pub const STAGED_TEST_RUN: &str = "stagedTestRun";

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default passthrough options (no extra harness arguments).
pub const DEFAULT_PASSTHROUGH_OPTIONS: &str = "";
/// Default spot instance usage.
pub const DEFAULT_USE_SPOT_INSTANCES: bool = false;
/// Default staged test run mode.
pub const DEFAULT_STAGED_TEST_RUN: bool = false;
/// Minimum accepted `concurrentBuilds` value.
pub const MIN_CONCURRENT_BUILDS: u32 = 1;
/// Minimum accepted `timeoutMinutes` value.
pub const MIN_TIMEOUT_MINUTES: u32 = 1;

// ============================================================================
// SECTION: Field Table
// ============================================================================

/// Declared type of a job definition field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string.
    String,
    /// Integer with a lower bound.
    Integer {
        /// Smallest accepted value.
        minimum: u32,
    },
    /// Boolean flag.
    Boolean,
    /// Ordered sequence of distinct, non-empty strings.
    StringList,
    /// Opaque mapping passed through unmodified.
    Mapping,
}

impl FieldKind {
    /// Returns a stable label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer {
                ..
            } => "integer",
            Self::Boolean => "boolean",
            Self::StringList => "sequence of string",
            Self::Mapping => "mapping",
        }
    }
}

/// Constant default substituted for an absent optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// String default.
    Str(&'static str),
    /// Boolean default.
    Bool(bool),
    /// Empty sequence default.
    EmptyList,
}

impl FieldDefault {
    /// Returns the default as a raw-record value.
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Str(value) => Value::String(value.to_string()),
            Self::Bool(value) => Value::Bool(value),
            Self::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Declaration of a single job definition field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Raw-record key.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
    /// Default for optional fields; `None` marks the field as required.
    pub default: Option<FieldDefault>,
    /// Human-readable description used in generated artifacts.
    pub description: &'static str,
}

impl FieldSpec {
    /// Returns true when the field must be supplied.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// All job definition fields in declaration order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: AMI_IMAGE_ID,
        kind: FieldKind::String,
        default: None,
        description: "Machine image identifier used to provision the test VM.",
    },
    FieldSpec {
        name: CONCURRENT_BUILDS,
        kind: FieldKind::Integer {
            minimum: MIN_CONCURRENT_BUILDS,
        },
        default: None,
        description: "Maximum concurrent builds of this job.",
    },
    FieldSpec {
        name: DISTRO_NAME,
        kind: FieldKind::String,
        default: None,
        description: "Target distribution name (for example freebsd).",
    },
    FieldSpec {
        name: DISTRO_VERSION,
        kind: FieldKind::String,
        default: None,
        description: "Target distribution version (for example 122).",
    },
    FieldSpec {
        name: DISTRO_ARCH,
        kind: FieldKind::String,
        default: None,
        description: "Target architecture (amd64, arm64, i386, ...).",
    },
    FieldSpec {
        name: ENVIRONMENT,
        kind: FieldKind::Mapping,
        default: None,
        description: "Build-context variables forwarded unmodified to the orchestration engine.",
    },
    FieldSpec {
        name: GOLDEN_IMAGES_BRANCH,
        kind: FieldKind::String,
        default: None,
        description: "Branch holding the golden image definitions.",
    },
    FieldSpec {
        name: AGENT_LABEL,
        kind: FieldKind::String,
        default: None,
        description: "Scheduler label selecting the agent that runs the job.",
    },
    FieldSpec {
        name: TEST_ENVIRONMENT_NAME,
        kind: FieldKind::String,
        default: None,
        description: "Test harness profile to execute.",
    },
    FieldSpec {
        name: PASSTHROUGH_OPTIONS,
        kind: FieldKind::String,
        default: Some(FieldDefault::Str(DEFAULT_PASSTHROUGH_OPTIONS)),
        description: "Opaque arguments forwarded to the test harness.",
    },
    FieldSpec {
        name: PYTHON_VERSION,
        kind: FieldKind::String,
        default: None,
        description: "Python runtime selector (py3, py2, ...).",
    },
    FieldSpec {
        name: TEST_SPLITS,
        kind: FieldKind::StringList,
        default: Some(FieldDefault::EmptyList),
        description: "Named test suite partitions; empty disables splitting.",
    },
    FieldSpec {
        name: TIMEOUT_MINUTES,
        kind: FieldKind::Integer {
            minimum: MIN_TIMEOUT_MINUTES,
        },
        default: None,
        description: "Wall-clock budget in minutes, enforced by the orchestration engine.",
    },
    FieldSpec {
        name: USE_SPOT_INSTANCES,
        kind: FieldKind::Boolean,
        default: Some(FieldDefault::Bool(DEFAULT_USE_SPOT_INSTANCES)),
        description: "Bid for preemptible spot capacity instead of on-demand instances.",
    },
    FieldSpec {
        name: STAGED_TEST_RUN,
        kind: FieldKind::Boolean,
        default: Some(FieldDefault::Bool(DEFAULT_STAGED_TEST_RUN)),
        description: "Sequence fast and slow test partitions instead of a uniform run.",
    },
];

/// Looks up a field declaration by raw-record key.
#[must_use]
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|field| field.name == name)
}
