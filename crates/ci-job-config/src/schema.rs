// crates/ci-job-config/src/schema.rs
// ============================================================================
// Module: Job Definition Schema
// Description: JSON schema builder for job definitions.
// Purpose: Provide a canonical validation schema for definition artifacts.
// Dependencies: ci-job-core, serde_json
// ============================================================================

//! ## Overview
//! The schema is generated from the shared field table, so required fields,
//! defaults, and lower bounds always match what normalization enforces. It is
//! used by editors and pipeline linters before a definition ever reaches the
//! normalizer.
//!
//! JSON Schema treats `360.0` as an integer, while normalization rejects any
//! float. Integer properties carry a `$comment` noting that the schema is the
//! looser of the two checks.

use ci_job_core::FIELDS;
use ci_job_core::FieldKind;
use ci_job_core::FieldSpec;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

/// Note attached to integer properties that the schema cannot express.
pub const INTEGER_LITERAL_COMMENT: &str =
    "Must be written as an integer literal; values such as 360.0 are rejected on load.";

/// Returns the JSON schema for job definitions.
#[must_use]
pub fn descriptor_schema() -> Value {
    let mut properties = Map::new();
    for field in FIELDS {
        properties.insert(field.name.to_string(), field_schema(field));
    }
    let required: Vec<&str> =
        FIELDS.iter().filter(|field| field.is_required()).map(|field| field.name).collect();
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "ci-job://schemas/job-definition.schema.json",
        "title": "CI Job Definition",
        "description": "Test-run job definition submitted to the orchestration engine.",
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Schema for a single field.
fn field_schema(field: &FieldSpec) -> Value {
    let mut schema = match field.kind {
        FieldKind::String if field.is_required() => json!({
            "type": "string",
            "minLength": 1,
            "pattern": "\\S"
        }),
        FieldKind::String => json!({ "type": "string" }),
        FieldKind::Integer {
            minimum,
        } => json!({
            "type": "integer",
            "minimum": minimum,
            "maximum": u32::MAX,
            "$comment": INTEGER_LITERAL_COMMENT
        }),
        FieldKind::Boolean => json!({ "type": "boolean" }),
        FieldKind::StringList => json!({
            "type": "array",
            "items": { "type": "string", "minLength": 1, "pattern": "\\S" },
            "uniqueItems": true
        }),
        FieldKind::Mapping => json!({ "type": "object" }),
    };
    if let Value::Object(object) = &mut schema {
        object.insert("description".to_string(), Value::String(field.description.to_string()));
        if let Some(default) = field.default {
            object.insert("default".to_string(), default.to_value());
        }
    }
    schema
}
