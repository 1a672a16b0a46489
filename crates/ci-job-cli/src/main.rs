// crates/ci-job-cli/src/main.rs
// ============================================================================
// Module: CI Job CLI Entry Point
// Description: Command dispatcher for job definition validation and submission.
// Purpose: Validate, normalize, and hand off CI job descriptors from pipelines.
// Dependencies: clap, ci-job-config, ci-job-core, serde_json, thiserror.
// ============================================================================

//! ## Overview
//! The `ci-job` CLI loads a pipeline job definition, normalizes it into a
//! validated descriptor, and optionally hands it to the orchestration engine.
//! It also prints the generated schema, example, and reference docs. Inputs
//! are untrusted; every failure exits non-zero with a message on stderr.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use ci_job_cli::AuditSink;
use ci_job_cli::FileAuditSink;
use ci_job_cli::FileHandoffSubmitter;
use ci_job_cli::JobAuditEvent;
use ci_job_cli::NoopAuditSink;
use ci_job_cli::StderrAuditSink;
use ci_job_cli::canonical_descriptor_json;
use ci_job_config::ConfigError;
use ci_job_config::EnvironmentCapture;
use ci_job_config::JobDefinition;
use ci_job_config::descriptor_docs_markdown;
use ci_job_config::descriptor_schema;
use ci_job_config::job_toml_example;
use ci_job_config::verify_descriptor_docs;
use ci_job_config::write_descriptor_docs;
use ci_job_core::JobDescriptor;
use ci_job_core::RunStatus;
use ci_job_core::TestRunSubmitter;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `--audit-log` value selecting the stderr sink.
const AUDIT_STDERR: &str = "-";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "ci-job", disable_help_subcommand = true)]
struct Cli {
    /// Audit log destination (`-` for stderr; disabled when omitted).
    #[arg(long, value_name = "PATH", global = true)]
    audit_log: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a job definition.
    Validate(DefinitionArgs),
    /// Print the canonical JSON form of a job definition.
    Normalize(DefinitionArgs),
    /// Validate a job definition and hand it to the orchestration engine.
    Submit(SubmitCommand),
    /// Print the job definition JSON schema.
    Schema,
    /// Print an example TOML job definition.
    Example,
    /// Render or verify the job definition reference docs.
    Docs(DocsCommand),
}

/// Shared arguments locating and enriching a job definition.
#[derive(Args, Debug, Clone, Default)]
struct DefinitionArgs {
    /// Definition file path (defaults to ci-job.toml or `CI_JOB_DEFINITION`).
    #[arg(long, value_name = "PATH")]
    definition: Option<PathBuf>,
    /// Capture build variables with this prefix when `environment` is not authored.
    #[arg(long = "capture-env", value_name = "PREFIX", action = ArgAction::Append)]
    capture_env: Vec<String>,
}

/// Arguments for `submit`.
#[derive(Args, Debug)]
struct SubmitCommand {
    /// Definition location and capture options.
    #[command(flatten)]
    definition: DefinitionArgs,
    /// File the canonical descriptor is handed off through.
    #[arg(long, value_name = "PATH")]
    handoff: PathBuf,
}

/// Arguments for `docs`.
#[derive(Args, Debug)]
struct DocsCommand {
    /// Write the rendered docs to this path instead of stdout.
    #[arg(long, value_name = "PATH", conflicts_with = "check")]
    out: Option<PathBuf>,
    /// Fail when the docs at this path differ from the rendered docs.
    #[arg(long, value_name = "PATH")]
    check: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let audit = build_audit_sink(cli.audit_log.as_deref())?;
    match cli.command {
        Commands::Validate(args) => command_validate(&args, audit.as_ref()),
        Commands::Normalize(args) => command_normalize(&args, audit.as_ref()),
        Commands::Submit(command) => command_submit(&command, audit.as_ref()),
        Commands::Schema => command_schema(),
        Commands::Example => command_example(),
        Commands::Docs(command) => command_docs(&command),
    }
}

// ============================================================================
// SECTION: Definition Commands
// ============================================================================

/// Executes `validate`.
fn command_validate(args: &DefinitionArgs, audit: &dyn AuditSink) -> CliResult<ExitCode> {
    let (descriptor, _) = load_audited(args, audit)?;
    write_stdout_line(&format!(
        "job definition valid: {} on {} ({} splits)",
        descriptor.ami_image_id(),
        descriptor.agent_label(),
        descriptor.test_splits().len()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `normalize`.
fn command_normalize(args: &DefinitionArgs, audit: &dyn AuditSink) -> CliResult<ExitCode> {
    let (descriptor, _) = load_audited(args, audit)?;
    let canonical = canonical_descriptor_json(&descriptor)
        .map_err(|err| CliError::new(format!("failed to encode descriptor: {err}")))?;
    write_stdout_line(&canonical).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `submit`.
fn command_submit(command: &SubmitCommand, audit: &dyn AuditSink) -> CliResult<ExitCode> {
    let (descriptor, source) = load_audited(&command.definition, audit)?;
    let source = source.as_deref();
    let submitter = FileHandoffSubmitter::new(&command.handoff);
    let result = match submitter.submit(descriptor.clone()) {
        Ok(result) => result,
        Err(err) => {
            audit.record(&JobAuditEvent::failed("job_submit_failed", source, err.to_string()));
            return Err(CliError::new(err.to_string()));
        }
    };
    audit.record(&JobAuditEvent::submitted(source, &descriptor, &result));
    write_stdout_line(&format!(
        "run {}: {}",
        status_label(result.status),
        result.reference.as_deref().unwrap_or("-")
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    match result.status {
        RunStatus::Failed => Ok(ExitCode::FAILURE),
        RunStatus::Accepted | RunStatus::Succeeded => Ok(ExitCode::SUCCESS),
    }
}

/// Loads and normalizes a definition, recording the outcome.
///
/// Returns the descriptor with the file it was resolved from.
fn load_audited(
    args: &DefinitionArgs,
    audit: &dyn AuditSink,
) -> CliResult<(JobDescriptor, Option<PathBuf>)> {
    let definition = match load_definition(args) {
        Ok(definition) => definition,
        Err(error) => {
            let requested = args.definition.as_deref();
            audit.record(&JobAuditEvent::failed("job_load_failed", requested, error.to_string()));
            return Err(CliError::new(error.to_string()));
        }
    };
    let source = definition.source().map(Path::to_path_buf);
    match definition.into_descriptor() {
        Ok(descriptor) => {
            audit.record(&JobAuditEvent::validated(source.as_deref(), &descriptor));
            Ok((descriptor, source))
        }
        Err(ConfigError::Normalize(error)) => {
            audit.record(&JobAuditEvent::rejected(source.as_deref(), &error));
            Err(CliError::new(ConfigError::Normalize(error).to_string()))
        }
        Err(error) => {
            let message = error.to_string();
            audit.record(&JobAuditEvent::failed("job_load_failed", source.as_deref(), message));
            Err(CliError::new(error.to_string()))
        }
    }
}

/// Loads a definition, applying environment capture when requested.
fn load_definition(args: &DefinitionArgs) -> Result<JobDefinition, ConfigError> {
    let mut definition = JobDefinition::load(args.definition.as_deref())?;
    if let Some(capture) = build_capture(&args.capture_env)? {
        definition.capture_environment(&capture)?;
    }
    Ok(definition)
}

/// Builds the environment capture for the requested prefixes.
fn build_capture(prefixes: &[String]) -> Result<Option<EnvironmentCapture>, ConfigError> {
    if prefixes.is_empty() {
        return Ok(None);
    }
    EnvironmentCapture::new(prefixes.iter().map(String::as_str)).map(Some)
}

// ============================================================================
// SECTION: Artifact Commands
// ============================================================================

/// Executes `schema`.
fn command_schema() -> CliResult<ExitCode> {
    let rendered = serde_json::to_string_pretty(&descriptor_schema())
        .map_err(|err| CliError::new(format!("failed to render schema: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `example`.
fn command_example() -> CliResult<ExitCode> {
    let example = job_toml_example();
    write_stdout_line(example.trim_end())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `docs`.
fn command_docs(command: &DocsCommand) -> CliResult<ExitCode> {
    if let Some(path) = &command.check {
        verify_descriptor_docs(Some(path)).map_err(|err| CliError::new(err.to_string()))?;
        write_stdout_line(&format!("docs up to date: {}", path.display()))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(path) = &command.out {
        write_descriptor_docs(Some(path)).map_err(|err| CliError::new(err.to_string()))?;
        return Ok(ExitCode::SUCCESS);
    }
    let docs = descriptor_docs_markdown().map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(docs.trim_end()).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Selects the audit sink for `--audit-log`.
fn build_audit_sink(path: Option<&Path>) -> CliResult<Box<dyn AuditSink>> {
    match path {
        None => Ok(Box::new(NoopAuditSink)),
        Some(path) if path.as_os_str() == AUDIT_STDERR => Ok(Box::new(StderrAuditSink)),
        Some(path) => FileAuditSink::new(path)
            .map(|sink| Box::new(sink) as Box<dyn AuditSink>)
            .map_err(|err| {
                CliError::new(format!("failed to open audit log {}: {err}", path.display()))
            }),
    }
}

/// Returns the display label for a run status.
const fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Accepted => "accepted",
        RunStatus::Succeeded => "succeeded",
        RunStatus::Failed => "failed",
    }
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
