// crates/ci-job-cli/src/handoff.rs
// ============================================================================
// Module: CI Job File Handoff
// Description: File-based submitter for the external orchestration engine.
// Purpose: Persist canonical descriptors where the engine picks them up.
// Dependencies: ci-job-core, serde_jcs, serde_json
// ============================================================================

//! ## Overview
//! [`FileHandoffSubmitter`] writes the descriptor's canonical JSON (RFC 8785)
//! to a handoff path. The engine consumes the file asynchronously, so the
//! submitter always reports [`RunStatus::Accepted`] with the handoff path as
//! the run reference. The payload is staged in a sibling temp file and
//! renamed into place so the engine never observes a partial descriptor.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use ci_job_core::JobDescriptor;
use ci_job_core::RunResult;
use ci_job_core::RunStatus;
use ci_job_core::SubmitError;
use ci_job_core::TestRunSubmitter;

// ============================================================================
// SECTION: Canonical Encoding
// ============================================================================

/// Renders a descriptor as canonical JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn canonical_descriptor_json(
    descriptor: &JobDescriptor,
) -> Result<String, serde_json::Error> {
    serde_jcs::to_string(&descriptor.as_raw_record())
}

// ============================================================================
// SECTION: Submitter
// ============================================================================

/// Submitter that hands descriptors off through the filesystem.
#[derive(Debug, Clone)]
pub struct FileHandoffSubmitter {
    /// Destination written on every submission.
    path: PathBuf,
}

impl FileHandoffSubmitter {
    /// Creates a submitter targeting `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Returns the handoff destination.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TestRunSubmitter for FileHandoffSubmitter {
    fn submit(&self, descriptor: JobDescriptor) -> Result<RunResult, SubmitError> {
        if self.path.is_dir() {
            return Err(SubmitError::Rejected(format!(
                "handoff path is a directory: {}",
                self.path.display()
            )));
        }
        let mut payload = canonical_descriptor_json(&descriptor)
            .map_err(|err| SubmitError::Io(err.to_string()))?;
        payload.push('\n');
        write_atomic(&self.path, payload.as_bytes())?;
        Ok(RunResult {
            status: RunStatus::Accepted,
            reference: Some(self.path.display().to_string()),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes `contents` to a sibling temp file, then renames it over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), SubmitError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| SubmitError::Rejected("handoff path has no file name".to_string()))?;
    let temp_path = path.with_file_name(format!(".{file_name}.tmp.{}", std::process::id()));
    let staged = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));
    if let Err(err) = staged {
        let _ = fs::remove_file(&temp_path);
        return Err(SubmitError::Io(err.to_string()));
    }
    Ok(())
}
