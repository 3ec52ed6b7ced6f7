//! Word-bounded keyword matching.
//!
//! A keyword only matches when it is not glued to other identifier
//! characters, so `updated_at` or `deleted` never trip `update` / `delete`.

use crate::error::GateError;
use regex::Regex;

/// Characters that may appear in an unquoted SQL identifier.
const WORD_CLASS: &str = "0-9A-Za-z_";

/// Case-insensitive matcher for a fixed set of keywords.
///
/// The pattern is compiled once when the set is built.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    pattern: Regex,
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build a matcher for the given keywords.
    ///
    /// Keywords must be non-empty and made of ASCII letters, digits and
    /// underscores. They are stored lowercased.
    pub fn new<I, S>(keywords: I) -> Result<Self, GateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                return Err(GateError::invalid_policy("Keyword cannot be empty"));
            }
            if !keyword
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(GateError::invalid_policy(format!(
                    "Keyword '{}' must contain only ASCII letters, digits or underscores",
                    keyword
                )));
            }
            let lower = keyword.to_ascii_lowercase();
            if !normalized.contains(&lower) {
                normalized.push(lower);
            }
        }

        if normalized.is_empty() {
            return Err(GateError::invalid_policy("Keyword set cannot be empty"));
        }

        let alternation = normalized
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(
            r"(?i)(?:^|[^{w}])({alt})(?:[^{w}]|$)",
            w = WORD_CLASS,
            alt = alternation
        );
        let pattern = Regex::new(&source)
            .map_err(|e| GateError::invalid_policy(format!("Keyword pattern failed: {}", e)))?;

        Ok(Self {
            pattern,
            keywords: normalized,
        })
    }

    /// Find the leftmost keyword occurrence, returning the text as written.
    pub fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Check whether any keyword occurs in the text.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Check whether `word` is one of the keywords in this set.
    pub fn contains(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
    }

    /// The keywords in this set, lowercased.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Find the first denylisted keyword in sanitized SQL.
pub fn find_disallowed<'a>(denylist: &KeywordSet, sanitized: &'a str) -> Option<&'a str> {
    denylist.find(sanitized)
}
