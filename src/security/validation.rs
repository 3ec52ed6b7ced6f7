//! Query gate: the single entry point that admits or refuses candidate SQL.

use crate::constants::LOG_QUERY_TRUNCATE_LENGTH;
use crate::error::{Rejection, RejectionKind};
use crate::policy::GatePolicy;
use crate::security::classify::classify_statement;
use crate::security::keywords::find_disallowed;
use crate::security::sanitize::sanitize;
use crate::security::statements::has_multiple_statements;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of validating one candidate query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The query is a single read-only SELECT.
    Accepted,
    /// The query was refused.
    Rejected(Rejection),
}

impl Verdict {
    /// Check if the query was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Get the rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(r) => Some(r),
        }
    }

    /// Get the rejection kind, if any.
    pub fn reason(&self) -> Option<RejectionKind> {
        self.rejection().map(Rejection::kind)
    }

    /// Convert into a `Result`, for use with `?`.
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected(r) => Err(r),
        }
    }
}

impl From<Result<(), Rejection>> for Verdict {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Verdict::Accepted,
            Err(r) => Verdict::Rejected(r),
        }
    }
}

/// Serializes as `{"accepted": true}` or
/// `{"accepted": false, "reason": "<kind>", "detail": "<keyword>"}`.
impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Verdict::Accepted => {
                let mut s = serializer.serialize_struct("Verdict", 1)?;
                s.serialize_field("accepted", &true)?;
                s.end()
            }
            Verdict::Rejected(rejection) => {
                let detail = rejection.detail();
                let len = if detail.is_some() { 3 } else { 2 };
                let mut s = serializer.serialize_struct("Verdict", len)?;
                s.serialize_field("accepted", &false)?;
                s.serialize_field("reason", &rejection.kind())?;
                if let Some(detail) = detail {
                    s.serialize_field("detail", detail)?;
                } else {
                    s.skip_field("detail")?;
                }
                s.end()
            }
        }
    }
}

/// Read-only SQL gate.
///
/// Cheap to clone; every clone shares the same compiled policy, so one gate
/// can serve any number of threads.
#[derive(Debug, Clone)]
pub struct QueryGate {
    policy: Arc<GatePolicy>,
}

impl Default for QueryGate {
    fn default() -> Self {
        Self::new(GatePolicy::builtin())
    }
}

impl QueryGate {
    /// Create a gate over a compiled policy.
    pub fn new(policy: Arc<GatePolicy>) -> Self {
        Self { policy }
    }

    /// The policy this gate enforces.
    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Validate candidate SQL.
    ///
    /// Steps run in a fixed order and the first failure wins: length,
    /// sanitization and NUL check, statement stacking, denylisted keywords,
    /// then leading statement classification.
    pub fn validate(&self, sql: &str) -> Verdict {
        let verdict = Verdict::from(self.check(sql));
        match &verdict {
            Verdict::Accepted => debug!(sql = %truncate_for_log(sql), "SQL accepted"),
            Verdict::Rejected(r) => warn!(
                reason = ?r.kind(),
                detail = r.detail().unwrap_or(""),
                sql = %truncate_for_log(sql),
                "SQL rejected: {}",
                r
            ),
        }
        verdict
    }

    /// Validate a dynamically typed value; anything but a JSON string is refused.
    pub fn validate_value(&self, value: &serde_json::Value) -> Verdict {
        match value.as_str() {
            Some(sql) => self.validate(sql),
            None => {
                warn!(value_type = json_type_name(value), "SQL rejected: not a string");
                Verdict::Rejected(Rejection::InvalidInputType)
            }
        }
    }

    fn check(&self, sql: &str) -> Result<(), Rejection> {
        let max_length = self.policy.max_length();
        // Bounded count: never walk further than one past the cap.
        if sql.chars().take(max_length.saturating_add(1)).count() > max_length {
            return Err(Rejection::TooLong { max_length });
        }

        let cleaned = sanitize(sql);
        if cleaned.contains('\0') {
            return Err(Rejection::NullByte);
        }

        if has_multiple_statements(&cleaned) {
            return Err(Rejection::MultipleStatements);
        }

        if let Some(token) = find_disallowed(self.policy.denylist(), &cleaned) {
            return Err(Rejection::DisallowedKeyword(token.to_string()));
        }

        classify_statement(
            &cleaned,
            self.policy.major_statements(),
            self.policy.allowed_statement(),
        )
    }
}

/// Truncate SQL for log output on a character boundary.
fn truncate_for_log(sql: &str) -> String {
    match sql.char_indices().nth(LOG_QUERY_TRUNCATE_LENGTH) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
