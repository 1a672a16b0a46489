// crates/ci-job-core/src/lib.rs
// ============================================================================
// Module: CI Job Core Library
// Description: Public API surface for the CI job descriptor core.
// Purpose: Expose descriptor types, the submission contract, and normalization.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! CI job core turns an untyped pipeline job definition into a validated,
//! defaulted, immutable [`JobDescriptor`]. The descriptor is then handed once
//! to an external test-orchestration engine through the [`TestRunSubmitter`]
//! contract. Normalization is pure: no I/O, no logging, no shared state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::RunResult;
pub use interfaces::RunStatus;
pub use interfaces::SubmitError;
pub use interfaces::TestRunSubmitter;
pub use runtime::InMemorySubmitter;
pub use runtime::JobDescriptorBuilder;
pub use runtime::normalize;
