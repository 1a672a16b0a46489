// crates/ci-job-config/src/lib.rs
// ============================================================================
// Module: CI Job Config Library
// Description: Job definition loading, validation, and artifact generation.
// Purpose: Single source of truth for ci-job.toml semantics.
// Dependencies: ci-job-core, serde_json, toml
// ============================================================================

//! ## Overview
//! `ci-job-config` loads pipeline job definitions from disk, captures the
//! ambient build environment on request, and normalizes the result through
//! `ci-job-core`. It also provides deterministic generators for the
//! definition schema, example, and docs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod docs;
pub mod examples;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use docs::descriptor_docs_markdown;
pub use docs::verify_descriptor_docs;
pub use docs::write_descriptor_docs;
pub use examples::job_toml_example;
pub use schema::INTEGER_LITERAL_COMMENT;
pub use schema::descriptor_schema;
