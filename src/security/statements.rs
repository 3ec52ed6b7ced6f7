//! Statement segmentation.
//!
//! Detects stacked statements by counting terminators in sanitized text.

/// Check whether sanitized SQL holds more than one statement.
///
/// One trailing semicolon (after trailing whitespace) is allowed; any other
/// semicolon counts. Parenthesis depth is not tracked, so a semicolon nested
/// inside a sub-select is treated exactly like top-level stacking.
pub fn has_multiple_statements(sanitized: &str) -> bool {
    let trimmed = sanitized.trim_end();
    let body = trimmed.strip_suffix(';').unwrap_or(trimmed);
    body.contains(';')
}
