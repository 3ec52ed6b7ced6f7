//! Configuration management for the SQL gate.
//!
//! Configuration is loaded from environment variables following the 12-factor app pattern.

use crate::constants::{ENV_MAX_LENGTH, ENV_POLICY_FILE};
use crate::error::GateError;
use crate::policy::{GatePolicy, PolicyConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Process configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Policy document, defaults unless a policy file was given
    pub policy: PolicyConfig,

    /// Where the policy was loaded from, if not built in
    pub policy_source: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// ## Optional
    /// - `SQL_GATE_POLICY_FILE`: Path to a JSON policy document (default: built-in policy)
    /// - `SQL_GATE_MAX_LENGTH`: Maximum SQL length in characters, overriding the policy
    pub fn from_env() -> Result<Self, GateError> {
        let policy_source = std::env::var(ENV_POLICY_FILE)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let mut policy = match &policy_source {
            Some(path) => PolicyConfig::from_file(path)?,
            None => PolicyConfig::default(),
        };

        if let Ok(raw) = std::env::var(ENV_MAX_LENGTH) {
            policy.max_length = raw.trim().parse().map_err(|_| {
                GateError::config(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_MAX_LENGTH, raw
                ))
            })?;
        }

        Ok(Self {
            policy,
            policy_source,
        })
    }

    /// Validate and compile the configured policy.
    pub fn build_policy(&self) -> Result<Arc<GatePolicy>, GateError> {
        let policy = GatePolicy::from_config(&self.policy)?;
        match &self.policy_source {
            Some(path) => info!(
                path = %path.display(),
                max_length = policy.max_length(),
                "Loaded gate policy from file"
            ),
            None => info!(max_length = policy.max_length(), "Using built-in gate policy"),
        }
        Ok(Arc::new(policy))
    }
}
