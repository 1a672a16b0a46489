// crates/ci-job-cli/src/audit.rs
// ============================================================================
// Module: CI Job Audit Logging
// Description: Structured audit events for job validation and submission.
// Purpose: Emit JSON-line audit logs without hard logging dependencies.
// Dependencies: ci-job-core, serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for CLI runs. Events
//! are serialized as one JSON object per line so deployments can route them
//! to their preferred logging pipeline. Normalization itself never logs; the
//! CLI records the outcome after the fact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use ci_job_core::JobDescriptor;
use ci_job_core::NormalizeError;
use ci_job_core::RunResult;
use ci_job_core::RunStatus;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// The operation completed.
    Ok,
    /// The definition was rejected by validation.
    Rejected,
    /// The operation failed outside validation (I/O, parse, submission).
    Error,
}

/// Job audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct JobAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Definition file when known.
    pub definition_path: Option<String>,
    /// Event outcome.
    pub outcome: AuditOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Field at fault for validation failures.
    pub field: Option<String>,
    /// Human-readable detail.
    pub message: Option<String>,
    /// Machine image of the validated descriptor.
    pub ami_image_id: Option<String>,
    /// Scheduler label of the validated descriptor.
    pub agent_label: Option<String>,
    /// Run status reported by the submitter.
    pub run_status: Option<RunStatus>,
    /// Run reference reported by the submitter.
    pub run_reference: Option<String>,
}

impl JobAuditEvent {
    /// Creates an empty event with a consistent timestamp.
    fn base(event: &'static str, outcome: AuditOutcome, definition_path: Option<&Path>) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            definition_path: definition_path.map(|path| path.display().to_string()),
            outcome,
            error_kind: None,
            field: None,
            message: None,
            ami_image_id: None,
            agent_label: None,
            run_status: None,
            run_reference: None,
        }
    }

    /// Records a descriptor that passed validation.
    #[must_use]
    pub fn validated(definition_path: Option<&Path>, descriptor: &JobDescriptor) -> Self {
        let mut event = Self::base("job_validated", AuditOutcome::Ok, definition_path);
        event.ami_image_id = Some(descriptor.ami_image_id().to_string());
        event.agent_label = Some(descriptor.agent_label().to_string());
        event
    }

    /// Records a definition rejected by normalization.
    #[must_use]
    pub fn rejected(definition_path: Option<&Path>, error: &NormalizeError) -> Self {
        let mut event = Self::base("job_rejected", AuditOutcome::Rejected, definition_path);
        event.error_kind = Some(error.kind());
        event.field = Some(error.field().to_string());
        event.message = Some(error.to_string());
        event
    }

    /// Records a load or submission failure unrelated to field validation.
    #[must_use]
    pub fn failed(event: &'static str, definition_path: Option<&Path>, message: String) -> Self {
        let mut record = Self::base(event, AuditOutcome::Error, definition_path);
        record.message = Some(message);
        record
    }

    /// Records a descriptor handed to the orchestration engine.
    #[must_use]
    pub fn submitted(
        definition_path: Option<&Path>,
        descriptor: &JobDescriptor,
        result: &RunResult,
    ) -> Self {
        let mut event = Self::validated(definition_path, descriptor);
        event.event = "job_submitted";
        event.run_status = Some(result.status);
        event.run_reference.clone_from(&result.reference);
        event
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for job events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &JobAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &JobAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &JobAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &JobAuditEvent) {}
}
