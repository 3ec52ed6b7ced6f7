//! # SQL Gate
//!
//! A conservative lexical gate for SQL produced by a language model.
//!
//! This crate provides:
//! - **Sanitization**: comments and quoted spans blanked before any scanning
//! - **Statement checks**: stacked statements and non-SELECT leading statements refused
//! - **Keyword policy**: a configurable denylist of mutating and administrative keywords
//! - **Completion review**: model `{sql, reason}` payloads checked before hand-off
//!
//! ## Architecture
//!
//! Every decision is taken on sanitized text, never on the raw input.
//! [`QueryGate`] runs the stages in a fixed order and stops at the first
//! rejection. The gate is pure and synchronous; share one across threads.
//!
//! ```
//! use sql_gate::{QueryGate, Rejection, Verdict};
//!
//! let gate = QueryGate::default();
//! assert!(gate.validate("SELECT '; DROP TABLE x; ' AS note").is_accepted());
//! assert_eq!(
//!     gate.validate("SELECT 1; SELECT 2;"),
//!     Verdict::Rejected(Rejection::MultipleStatements)
//! );
//! ```

pub mod completion;
pub mod config;
pub mod constants;
pub mod error;
pub mod policy;
pub mod security;

pub use config::Config;
pub use error::{GateError, Rejection, RejectionKind};
pub use policy::{GatePolicy, PolicyConfig};
pub use security::{QueryGate, Verdict};
