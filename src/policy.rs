//! Gate policy.
//!
//! [`PolicyConfig`] is the versionable artifact loaded from JSON;
//! [`GatePolicy`] is its validated, compiled form, built once and shared
//! read-only between validations.

use crate::constants::{
    DEFAULT_ALLOWED_STATEMENT, DEFAULT_DENYLIST, DEFAULT_MAJOR_STATEMENTS,
    DEFAULT_MAX_SQL_LENGTH, POLICY_VERSION,
};
use crate::error::GateError;
use crate::security::KeywordSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Serializable policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Schema version of this document
    pub version: u32,

    /// Maximum SQL length in characters
    pub max_length: usize,

    /// Keywords rejected anywhere outside literals and comments
    pub denylist: Vec<String>,

    /// Keywords that open a top-level statement
    pub major_statements: Vec<String>,

    /// The only major statement allowed to lead
    pub allowed_statement: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            version: POLICY_VERSION,
            max_length: DEFAULT_MAX_SQL_LENGTH,
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            major_statements: DEFAULT_MAJOR_STATEMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_statement: DEFAULT_ALLOWED_STATEMENT.to_string(),
        }
    }
}

impl PolicyConfig {
    /// Parse a policy document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, GateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a policy document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GateError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| GateError::PolicyIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}

/// Compiled, immutable gate policy.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    max_length: usize,
    denylist: KeywordSet,
    major_statements: KeywordSet,
    allowed_statement: String,
}

/// Built-in policy, compiled on first use.
static DEFAULT_POLICY: Lazy<Arc<GatePolicy>> = Lazy::new(|| {
    let policy = GatePolicy::from_config(&PolicyConfig::default())
        .unwrap_or_else(|e| panic!("Internal error: invalid built-in policy: {}", e));
    Arc::new(policy)
});

impl GatePolicy {
    /// Validate and compile a policy document.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, GateError> {
        if config.version != POLICY_VERSION {
            return Err(GateError::invalid_policy(format!(
                "Unsupported policy version {} (expected {})",
                config.version, POLICY_VERSION
            )));
        }

        if config.max_length == 0 {
            return Err(GateError::invalid_policy(
                "max_length must be greater than zero",
            ));
        }

        let denylist = KeywordSet::new(&config.denylist)?;
        let major_statements = KeywordSet::new(&config.major_statements)?;

        let allowed_statement = config.allowed_statement.trim().to_ascii_lowercase();
        if !major_statements.contains(&allowed_statement) {
            return Err(GateError::invalid_policy(format!(
                "allowed_statement '{}' is not one of major_statements",
                config.allowed_statement
            )));
        }

        if denylist.contains(&allowed_statement) {
            return Err(GateError::invalid_policy(format!(
                "allowed_statement '{}' cannot also be denylisted",
                allowed_statement
            )));
        }

        Ok(Self {
            max_length: config.max_length,
            denylist,
            major_statements,
            allowed_statement,
        })
    }

    /// Shared handle to the built-in policy.
    pub fn builtin() -> Arc<GatePolicy> {
        Arc::clone(&DEFAULT_POLICY)
    }

    /// Maximum SQL length in characters.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Denylisted keywords.
    pub fn denylist(&self) -> &KeywordSet {
        &self.denylist
    }

    /// Major-statement keywords.
    pub fn major_statements(&self) -> &KeywordSet {
        &self.major_statements
    }

    /// The statement allowed to lead, lowercased.
    pub fn allowed_statement(&self) -> &str {
        &self.allowed_statement
    }
}
