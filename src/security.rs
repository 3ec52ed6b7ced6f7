//! Lexical SQL gate: sanitization, statement segmentation, keyword policy and
//! statement classification, sequenced by [`QueryGate`].

mod classify;
mod keywords;
mod sanitize;
mod statements;
mod validation;

pub use classify::classify_statement;
pub use keywords::{find_disallowed, KeywordSet};
pub use sanitize::sanitize;
pub use statements::has_multiple_statements;
pub use validation::{QueryGate, Verdict};
