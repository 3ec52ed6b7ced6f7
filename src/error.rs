//! Error types for the SQL gate.
//!
//! Two families live here: [`Rejection`] is the closed set of reasons the gate
//! refuses a query, and [`GateError`] covers operational failures such as a
//! malformed policy file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Why the gate refused a candidate query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Input was not a string
    #[error("SQL must be a string.")]
    InvalidInputType,

    /// Input exceeds the policy maximum
    #[error("SQL too long (> {max_length} chars).")]
    TooLong { max_length: usize },

    /// Sanitized text contains a NUL character
    #[error("SQL contains null bytes.")]
    NullByte,

    /// More than one statement terminator outside literals
    #[error("Multiple statements are not allowed.")]
    MultipleStatements,

    /// A denylisted keyword appears outside literals and comments
    #[error("Disallowed keyword found: {}.", .0.to_uppercase())]
    DisallowedKeyword(String),

    /// The leading statement is not the allowed one
    #[error("Only SELECT is permitted (found {}).", .0.to_uppercase())]
    NonSelectStatement(String),

    /// A `WITH` prefix that never reaches a `SELECT`
    #[error("WITH must lead to a SELECT query.")]
    DanglingWith,
}

/// Serializable tag for a [`Rejection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionKind {
    InvalidInputType,
    TooLong,
    NullByte,
    MultipleStatements,
    DisallowedKeyword,
    NonSelectStatement,
    DanglingWith,
}

impl Rejection {
    /// Get the tag for this rejection.
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::InvalidInputType => RejectionKind::InvalidInputType,
            Self::TooLong { .. } => RejectionKind::TooLong,
            Self::NullByte => RejectionKind::NullByte,
            Self::MultipleStatements => RejectionKind::MultipleStatements,
            Self::DisallowedKeyword(_) => RejectionKind::DisallowedKeyword,
            Self::NonSelectStatement(_) => RejectionKind::NonSelectStatement,
            Self::DanglingWith => RejectionKind::DanglingWith,
        }
    }

    /// The offending keyword, where one applies.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::DisallowedKeyword(token) => Some(token),
            Self::NonSelectStatement(keyword) => Some(keyword),
            _ => None,
        }
    }
}

/// Operational errors: configuration and policy loading.
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Policy file could not be read
    #[error("Failed to read policy file {}: {source}", path.display())]
    PolicyIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Policy document is not valid JSON for the policy schema
    #[error("Failed to parse policy: {0}")]
    PolicyParse(#[from] serde_json::Error),

    /// Policy parsed but violates a structural rule
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

impl GateError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid policy error.
    pub fn invalid_policy(msg: impl Into<String>) -> Self {
        Self::InvalidPolicy(msg.into())
    }

    /// Get a user-friendly suggestion for how to fix this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some("Check your environment variables and configuration"),
            Self::PolicyIo { .. } => Some("Check that the policy file exists and is readable"),
            Self::PolicyParse(_) => Some("Check the policy file is a JSON object"),
            Self::InvalidPolicy(_) => Some("Review the policy against the documented schema"),
        }
    }
}
