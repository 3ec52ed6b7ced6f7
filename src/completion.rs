//! Review of model completions.
//!
//! The SQL generator asks the model for a strict JSON object
//! `{"sql": "...", "reason": "..."}`. This module parses that content,
//! runs the gate over `sql`, and hands back either the accepted payload or
//! the reason it must not be executed. Rejected SQL is never repaired.

use crate::error::Rejection;
use crate::security::QueryGate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// SQL and explanation returned by the model, after the gate accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledSql {
    pub sql: String,
    pub reason: String,
}

/// Why a completion could not be turned into executable SQL.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Content is not a JSON object
    #[error("Model response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// JSON parsed but `sql` or `reason` is missing or empty
    #[error("Model did not return {{sql, reason}}.")]
    MissingFields,

    /// The gate refused the SQL
    #[error("Rejected SQL: {0}")]
    Rejected(Rejection),
}

#[derive(Debug, Deserialize)]
struct RawCompletion {
    #[serde(default)]
    sql: Option<serde_json::Value>,
    #[serde(default)]
    reason: Option<serde_json::Value>,
}

/// Strip a surrounding Markdown code fence, if the model added one.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

fn non_empty_string(value: Option<&serde_json::Value>) -> Option<&str> {
    value.and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

/// Parse completion content into its `sql` and `reason` parts.
///
/// Does not validate the SQL; see [`review_completion`].
pub fn parse_completion(content: &str) -> Result<CompiledSql, CompletionError> {
    let raw: RawCompletion = serde_json::from_str(strip_code_fences(content))?;

    match (
        non_empty_string(raw.sql.as_ref()),
        non_empty_string(raw.reason.as_ref()),
    ) {
        (Some(sql), Some(reason)) => Ok(CompiledSql {
            sql: sql.to_string(),
            reason: reason.to_string(),
        }),
        _ => Err(CompletionError::MissingFields),
    }
}

/// Parse completion content and run the gate over its SQL.
pub fn review_completion(gate: &QueryGate, content: &str) -> Result<CompiledSql, CompletionError> {
    let compiled = parse_completion(content).inspect_err(|e| {
        warn!(error = %e, "Unusable model completion");
    })?;

    gate.validate(&compiled.sql)
        .into_result()
        .map_err(CompletionError::Rejected)?;

    info!(reason = %compiled.reason, "Model SQL passed the gate");
    Ok(compiled)
}
