// crates/ci-job-core/src/core/mod.rs
// ============================================================================
// Module: CI Job Core Types
// Description: Canonical job descriptor, field table, and validation errors.
// Purpose: Provide stable, serializable types for CI job definitions.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types define the job descriptor schema: the field table shared by
//! validation and generated artifacts, the opaque identifiers carried by a
//! descriptor, and the error taxonomy raised when a definition is malformed.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod descriptor;
pub mod error;
pub mod fields;
pub mod identifiers;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::JobDescriptor;
pub use descriptor::RawRecord;
pub use error::NormalizeError;
pub use error::ValueKind;
pub use fields::DEFAULT_PASSTHROUGH_OPTIONS;
pub use fields::DEFAULT_STAGED_TEST_RUN;
pub use fields::DEFAULT_USE_SPOT_INSTANCES;
pub use fields::FIELDS;
pub use fields::FieldKind;
pub use fields::FieldSpec;
pub use identifiers::AgentLabel;
pub use identifiers::AmiImageId;
pub use identifiers::BranchName;
pub use identifiers::SplitName;
