//! Leading statement classification.

use crate::constants::CTE_PREFIX_KEYWORD;
use crate::error::Rejection;
use crate::security::keywords::KeywordSet;

/// Classify sanitized SQL by its leading statement.
///
/// The first major-statement keyword must be `allowed`. Text that opens with
/// a `WITH` prefix must contain `allowed` somewhere. Text without any major
/// keyword passes this stage.
pub fn classify_statement(
    sanitized: &str,
    major: &KeywordSet,
    allowed: &str,
) -> Result<(), Rejection> {
    if let Some(found) = major.find(sanitized) {
        let keyword = found.to_ascii_lowercase();
        if keyword != allowed {
            return Err(Rejection::NonSelectStatement(keyword));
        }
    }

    if starts_with_word(sanitized.trim_start(), CTE_PREFIX_KEYWORD)
        && !contains_word(sanitized, allowed)
    {
        return Err(Rejection::DanglingWith);
    }

    Ok(())
}

/// Check whether `text` opens with `word` followed by a non-identifier character.
fn starts_with_word(text: &str, word: &str) -> bool {
    match text.get(..word.len()) {
        Some(head) if head.eq_ignore_ascii_case(word) => text[word.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_identifier_char(c)),
        _ => false,
    }
}

/// Check whether `word` appears in `text` as a standalone word.
fn contains_word(text: &str, word: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    let mut start = 0;
    while let Some(pos) = lower[start..].find(word) {
        let abs = start + pos;
        let before_ok = lower[..abs]
            .chars()
            .next_back()
            .is_none_or(|c| !is_identifier_char(c));
        let after_ok = lower[abs + word.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_identifier_char(c));
        if before_ok && after_ok {
            return true;
        }
        start = abs + word.len();
    }
    false
}

/// Check if a character is a valid unquoted SQL identifier character.
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
