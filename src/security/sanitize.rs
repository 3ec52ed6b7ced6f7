//! Lexical sanitizer.
//!
//! Blanks out comments, string literals and quoted identifiers so that the
//! remaining text can be scanned for keywords and statement terminators
//! without being fooled by anything hidden inside them.

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    LineComment,
    BlockComment,
    SingleQuoted,
    DoubleQuoted,
}

/// Replace every comment and quoted span with a single space.
///
/// Everything outside those spans is copied verbatim. A comment or quoted
/// span that is still open at end of input is absorbed to the end and also
/// collapses to one space; this stage never fails.
///
/// # Examples
///
/// ```
/// use sql_gate::security::sanitize;
///
/// assert_eq!(sanitize("SELECT 'a;b' -- x"), "SELECT    ");
/// assert_eq!(sanitize("SELECT /* drop */ 1"), "SELECT   1");
/// ```
pub fn sanitize(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut state = State::Normal;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        state = match state {
            State::Normal => match (c, chars.peek().copied()) {
                ('-', Some('-')) => {
                    chars.next();
                    State::LineComment
                }
                ('/', Some('*')) => {
                    chars.next();
                    State::BlockComment
                }
                ('\'', _) => State::SingleQuoted,
                ('"', _) => State::DoubleQuoted,
                _ => {
                    out.push(c);
                    State::Normal
                }
            },
            State::LineComment => {
                if c == '\n' {
                    out.push(' ');
                    out.push('\n');
                    State::Normal
                } else {
                    State::LineComment
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push(' ');
                    State::Normal
                } else {
                    State::BlockComment
                }
            }
            State::SingleQuoted => close_quoted(c, '\'', &mut chars, &mut out, State::SingleQuoted),
            State::DoubleQuoted => close_quoted(c, '"', &mut chars, &mut out, State::DoubleQuoted),
        };
    }

    // Whatever is still open ran to end of input.
    if state != State::Normal {
        out.push(' ');
    }

    out
}

/// Step inside a quoted span: a doubled quote is an escape, a lone one ends it.
fn close_quoted(
    c: char,
    quote: char,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    out: &mut String,
    current: State,
) -> State {
    if c != quote {
        return current;
    }
    if chars.peek() == Some(&quote) {
        chars.next();
        return current;
    }
    out.push(' ');
    State::Normal
}
