// crates/ci-job-core/src/interfaces/mod.rs
// ============================================================================
// Module: CI Job Interfaces
// Description: Contract surface for the external test-orchestration engine.
// Purpose: Define how a validated descriptor leaves this crate.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! The orchestration engine (provisioning, spot bidding, harness execution,
//! reporting) lives outside this workspace. It is reached through the single
//! [`TestRunSubmitter`] call, which consumes the descriptor so each
//! descriptor is submitted at most once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::JobDescriptor;

// ============================================================================
// SECTION: Run Result
// ============================================================================

/// Status reported by the orchestration engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The engine accepted the run for asynchronous execution.
    Accepted,
    /// The run completed successfully.
    Succeeded,
    /// The run completed with failures.
    Failed,
}

/// Opaque result of a test-run submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Reported status.
    pub status: RunStatus,
    /// Engine-specific run reference, when one is issued.
    pub reference: Option<String>,
}

// ============================================================================
// SECTION: Submitter
// ============================================================================

/// Submission errors raised before the engine reports a result.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The engine refused the descriptor.
    #[error("submission rejected: {0}")]
    Rejected(String),
    /// The submission transport failed.
    #[error("submission io error: {0}")]
    Io(String),
}

/// External orchestration entry point.
pub trait TestRunSubmitter {
    /// Submits a validated descriptor for execution.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the descriptor cannot be handed off.
    fn submit(&self, descriptor: JobDescriptor) -> Result<RunResult, SubmitError>;
}
