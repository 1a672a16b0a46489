// crates/ci-job-core/src/runtime/mod.rs
// ============================================================================
// Module: CI Job Runtime
// Description: Normalization, descriptor builder, and in-memory submitter.
// Purpose: Produce validated descriptors and hand them to a submitter.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the single normalization path and the helpers
//! built on it. All front ends (files, builder, CLI) call into [`normalize`]
//! so every descriptor obeys the same rules.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod builder;
pub mod normalize;
pub mod submit;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::JobDescriptorBuilder;
pub use normalize::normalize;
pub use submit::InMemorySubmitter;
