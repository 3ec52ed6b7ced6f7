//! Centralized constants for the SQL gate.
//!
//! This module contains the default policy values used throughout the
//! codebase, making them easy to find, understand, and modify.

// =============================================================================
// Policy Defaults
// =============================================================================

/// Default maximum SQL length, in characters.
pub const DEFAULT_MAX_SQL_LENGTH: usize = 20_000;

/// Policy artifact version understood by this build.
pub const POLICY_VERSION: u32 = 1;

/// Keywords rejected anywhere in sanitized SQL, even inside CTE bodies.
pub const DEFAULT_DENYLIST: &[&str] = &[
    // Data modification
    "insert",
    "update",
    "delete",
    "merge",
    // Schema modification
    "create",
    "alter",
    "drop",
    "truncate",
    "replace",
    // Permissions
    "grant",
    "revoke",
    // Database and extension management
    "attach",
    "detach",
    "copy",
    "export",
    "load",
    "install",
    "uninstall",
    // Procedure calls
    "call",
    "exec",
    "execute",
    // Session settings
    "set",
    "reset",
    "pragma",
    // Transaction control
    "begin",
    "commit",
    "rollback",
    "savepoint",
    "release",
    // Maintenance
    "vacuum",
    "analyze",
    "explain",
    "refresh",
    "cluster",
    "reindex",
    "checkpoint",
];

/// Keywords that open a top-level statement.
pub const DEFAULT_MAJOR_STATEMENTS: &[&str] = &["select", "insert", "update", "delete", "merge"];

/// The only statement the gate lets through.
pub const DEFAULT_ALLOWED_STATEMENT: &str = "select";

/// Keyword that opens a common table expression prefix.
pub const CTE_PREFIX_KEYWORD: &str = "with";

// =============================================================================
// Environment Variables
// =============================================================================

/// Path to a JSON policy artifact.
pub const ENV_POLICY_FILE: &str = "SQL_GATE_POLICY_FILE";

/// Override for the maximum SQL length.
pub const ENV_MAX_LENGTH: &str = "SQL_GATE_MAX_LENGTH";

// =============================================================================
// Logging Constants
// =============================================================================

/// Default truncation length for query logging.
pub const LOG_QUERY_TRUNCATE_LENGTH: usize = 100;
