// crates/ci-job-core/src/runtime/submit.rs
// ============================================================================
// Module: CI Job In-Memory Submitter
// Description: Recording test-run submitter for tests and examples.
// Purpose: Stand in for the external orchestration engine.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`InMemorySubmitter`] records each descriptor it receives and answers with
//! a preconfigured [`RunResult`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::core::JobDescriptor;
use crate::interfaces::RunResult;
use crate::interfaces::RunStatus;
use crate::interfaces::SubmitError;
use crate::interfaces::TestRunSubmitter;

// ============================================================================
// SECTION: In-Memory Submitter
// ============================================================================

/// In-memory submitter for tests and examples.
#[derive(Debug, Clone)]
pub struct InMemorySubmitter {
    /// Descriptors received, in submission order.
    submissions: Arc<Mutex<Vec<JobDescriptor>>>,
    /// Result returned for every submission.
    result: RunResult,
}

impl Default for InMemorySubmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySubmitter {
    /// Creates a submitter that accepts every descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_result(RunResult {
            status: RunStatus::Accepted,
            reference: None,
        })
    }

    /// Creates a submitter that answers with `result`.
    #[must_use]
    pub fn with_result(result: RunResult) -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// Returns the descriptors received so far.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Io`] when the submission log is poisoned.
    pub fn submissions(&self) -> Result<Vec<JobDescriptor>, SubmitError> {
        let guard = self
            .submissions
            .lock()
            .map_err(|_| SubmitError::Io("submission log lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

impl TestRunSubmitter for InMemorySubmitter {
    fn submit(&self, descriptor: JobDescriptor) -> Result<RunResult, SubmitError> {
        let mut guard = self
            .submissions
            .lock()
            .map_err(|_| SubmitError::Io("submission log lock poisoned".to_string()))?;
        guard.push(descriptor);
        Ok(self.result.clone())
    }
}
