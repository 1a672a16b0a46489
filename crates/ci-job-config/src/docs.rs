// crates/ci-job-config/src/docs.rs
// ============================================================================
// Module: Job Definition Docs Generator
// Description: Markdown generator for job definition documentation.
// Purpose: Keep definition docs in sync with the field table and schema.
// Dependencies: ci-job-core, serde_json, std
// ============================================================================

//! ## Overview
//! Generates the field reference for `ci-job.toml` from the shared field
//! table. Output is deterministic; [`verify_descriptor_docs`] detects drift
//! against a committed copy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;
use std::fs;
use std::path::Path;

use ci_job_core::FIELDS;
use ci_job_core::FieldKind;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default output path for generated definition docs.
const DOCS_PATH: &str = "Docs/configuration/ci-job.toml.md";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when generating or verifying definition docs.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO failure while reading or writing docs.
    #[error("docs io error: {0}")]
    Io(String),
    /// Rendering error.
    #[error("docs render error: {0}")]
    Render(String),
    /// Generated docs do not match the committed file.
    #[error("docs drift: {0}")]
    Drift(String),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generates the job definition markdown documentation.
///
/// # Errors
///
/// Returns [`DocsError`] when rendering fails.
pub fn descriptor_docs_markdown() -> Result<String, DocsError> {
    let mut out = String::new();

    out.push_str("<!--\n");
    out.push_str("Docs/configuration/ci-job.toml.md\n");
    out.push_str("============================================================================\n");
    out.push_str("Document: CI Job Definition\n");
    out.push_str("Description: Reference for ci-job.toml job definition fields.\n");
    out.push_str("Generated: This file is auto-generated; do not edit manually.\n");
    out.push_str("============================================================================\n");
    out.push_str("-->\n\n");

    out.push_str("# ci-job.toml Job Definition\n\n");
    out.push_str("## Overview\n\n");
    out.push_str("A job definition selects the machine image, harness profile, and runtime\n");
    out.push_str("limits of one test run. Keys are camelCase; unknown keys are rejected and\n");
    out.push_str("omitted optional keys take the defaults below.\n\n");

    out.push_str("## Fields\n\n");
    out.push_str("| Field | Type | Required | Default | Description |\n");
    out.push_str("| --- | --- | --- | --- | --- |\n");
    for field in FIELDS {
        let default = field.default.map_or_else(String::new, |default| {
            format_default_value(&default.to_value())
        });
        writeln!(
            out,
            "| `{}` | {} | {} | {} | {} |",
            field.name,
            format_kind(field.kind),
            if field.is_required() { "yes" } else { "no" },
            escape_table_cell(&default),
            escape_table_cell(field.description),
        )
        .map_err(|err| DocsError::Render(err.to_string()))?;
    }
    out.push('\n');
    out.push_str("`testSplits` entries must be non-empty and distinct. `testSplits` and\n");
    out.push_str("`stagedTestRun` are independent options.\n");
    Ok(out)
}

/// Writes the generated docs to the standard location.
///
/// # Errors
///
/// Returns [`DocsError`] when file output fails.
pub fn write_descriptor_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let path = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    let content = descriptor_docs_markdown()?;
    fs::write(path, content.as_bytes()).map_err(|err| DocsError::Io(err.to_string()))
}

/// Verifies the on-disk docs match the generated output.
///
/// # Errors
///
/// Returns [`DocsError`] when the docs drift.
pub fn verify_descriptor_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let path = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    let content = descriptor_docs_markdown()?;
    let existing = fs::read_to_string(path).map_err(|err| DocsError::Io(err.to_string()))?;
    if existing != content {
        return Err(DocsError::Drift(format!("docs mismatch: {}", path.display())));
    }
    Ok(())
}

// ============================================================================
// SECTION: Formatting Helpers
// ============================================================================

/// Formats a field kind for display.
fn format_kind(kind: FieldKind) -> String {
    match kind {
        FieldKind::Integer {
            minimum,
        } => format!("integer (>= {minimum})"),
        other => other.label().to_string(),
    }
}

/// Escapes pipe characters for markdown table cells.
fn escape_table_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Formats defaults for display in docs.
fn format_default_value(value: &Value) -> String {
    match value {
        Value::String(text) => format!("\"{text}\""),
        other => other.to_string(),
    }
}
