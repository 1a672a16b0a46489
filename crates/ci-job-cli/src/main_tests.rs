// crates/ci-job-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and helper wiring.
// Purpose: Ensure CLI flags map onto loader, capture, and audit behavior.
// Dependencies: ci-job-cli main helpers
// ============================================================================

//! ## Overview
//! Validates clap parsing, environment capture selection, and audit sink
//! selection for the `ci-job` entry point.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use ci_job_cli::AuditSink;
use ci_job_cli::JobAuditEvent;
use ci_job_config::DEFAULT_DEFINITION_NAME;
use ci_job_config::DEFINITION_ENV_VAR;
use ci_job_config::job_toml_example;
use ci_job_core::RunStatus;
use clap::CommandFactory;
use clap::Parser;

use super::Cli;
use super::Commands;
use super::DefinitionArgs;
use super::build_audit_sink;
use super::build_capture;
use super::load_audited;
use super::load_definition;
use super::status_label;

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn validate_collects_repeated_capture_prefixes() {
    let cli = Cli::try_parse_from([
        "ci-job",
        "validate",
        "--definition",
        "jobs/freebsd.toml",
        "--capture-env",
        "BRANCH_",
        "--capture-env",
        "BUILD_",
    ])
    .expect("parse validate");
    let Commands::Validate(args) = cli.command else {
        panic!("expected validate command");
    };
    assert_eq!(args.definition, Some(PathBuf::from("jobs/freebsd.toml")));
    assert_eq!(args.capture_env, vec!["BRANCH_".to_string(), "BUILD_".to_string()]);
}

#[test]
fn submit_requires_handoff() {
    assert!(Cli::try_parse_from(["ci-job", "submit"]).is_err());
    let cli = Cli::try_parse_from(["ci-job", "submit", "--handoff", "out/job.json"])
        .expect("parse submit");
    let Commands::Submit(command) = cli.command else {
        panic!("expected submit command");
    };
    assert_eq!(command.handoff, PathBuf::from("out/job.json"));
    assert!(command.definition.definition.is_none());
}

#[test]
fn audit_log_is_global() {
    let cli = Cli::try_parse_from(["ci-job", "schema", "--audit-log", "-"]).expect("parse schema");
    assert_eq!(cli.audit_log, Some(PathBuf::from("-")));
    assert!(matches!(cli.command, Commands::Schema));
}

#[test]
fn docs_out_and_check_conflict() {
    let parsed =
        Cli::try_parse_from(["ci-job", "docs", "--out", "a.md", "--check", "b.md"]);
    assert!(parsed.is_err());
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Audit sink that keeps events in memory.
#[derive(Default)]
struct RecordingSink {
    /// Recorded events.
    events: Mutex<Vec<JobAuditEvent>>,
}

impl AuditSink for RecordingSink {
    fn record(&self, event: &JobAuditEvent) {
        self.events.lock().expect("events lock").push(event.clone());
    }
}

#[test]
fn capture_is_skipped_without_prefixes() {
    assert!(build_capture(&[]).expect("no prefixes").is_none());
    let capture = build_capture(&["BUILD_".to_string()]).expect("capture").expect("some capture");
    assert_eq!(capture.prefixes(), ["BUILD_".to_string()]);
    assert!(build_capture(&[String::new()]).is_err());
}

#[test]
fn audit_sink_opens_file_destinations() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("audit.jsonl");
    assert!(build_audit_sink(None).is_ok());
    assert!(build_audit_sink(Some(Path::new("-"))).is_ok());
    assert!(build_audit_sink(Some(&path)).is_ok());
    assert!(path.exists());
    assert!(build_audit_sink(Some(dir.path())).is_err());
}

#[test]
fn load_definition_reads_example_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ci-job.toml");
    std::fs::write(&path, job_toml_example()).expect("write example");
    let args = DefinitionArgs {
        definition: Some(path),
        capture_env: Vec::new(),
    };
    let descriptor = load_definition(&args)
        .expect("load example")
        .into_descriptor()
        .expect("normalize example");
    assert_eq!(descriptor.distro_name(), "freebsd");
    assert_eq!(descriptor.timeout_minutes(), 360);
}

#[test]
fn status_labels_are_lowercase() {
    assert_eq!(status_label(RunStatus::Accepted), "accepted");
    assert_eq!(status_label(RunStatus::Succeeded), "succeeded");
    assert_eq!(status_label(RunStatus::Failed), "failed");
}

#[test]
fn audit_records_resolved_definition_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("jobs.toml");
    std::fs::write(&path, job_toml_example()).expect("write example");
    let sink = RecordingSink::default();
    let args = DefinitionArgs {
        definition: Some(path.clone()),
        capture_env: Vec::new(),
    };
    let (_, source) = load_audited(&args, &sink).expect("load audited");
    assert_eq!(source.as_deref(), Some(path.as_path()));
    let events = sink.events.lock().expect("events lock");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "job_validated");
    assert_eq!(events[0].definition_path, Some(path.display().to_string()));
}

// Only test in this binary that changes the working directory.
#[test]
fn audit_records_default_definition_path() {
    if std::env::var_os(DEFINITION_ENV_VAR).is_some() {
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let toml = job_toml_example().replace("timeoutMinutes = 360\n", "timeoutMinutes = 0\n");
    std::fs::write(dir.path().join(DEFAULT_DEFINITION_NAME), toml).expect("write definition");
    let sink = RecordingSink::default();
    let original = std::env::current_dir().expect("current dir");
    std::env::set_current_dir(dir.path()).expect("enter temp dir");
    let result = load_audited(&DefinitionArgs::default(), &sink);
    std::env::set_current_dir(original).expect("restore dir");

    assert!(result.is_err());
    let events = sink.events.lock().expect("events lock");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "job_rejected");
    assert_eq!(events[0].field.as_deref(), Some("timeoutMinutes"));
    assert_eq!(events[0].definition_path.as_deref(), Some(DEFAULT_DEFINITION_NAME));
}
