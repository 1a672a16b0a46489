// crates/ci-job-cli/src/lib.rs
// ============================================================================
// Module: CI Job CLI Library
// Description: Shared helpers for the ci-job command line.
// Purpose: Expose audit sinks and the file handoff submitter for reuse and tests.
// Dependencies: ci-job-core, serde, serde_json, serde_jcs
// ============================================================================

//! ## Overview
//! Library half of the `ci-job` binary. The binary wires these pieces to
//! `clap` subcommands; they live here so integration tests can drive them
//! directly.

pub mod audit;
pub mod handoff;

pub use audit::AuditOutcome;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::JobAuditEvent;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use handoff::FileHandoffSubmitter;
pub use handoff::canonical_descriptor_json;
