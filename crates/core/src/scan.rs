//! Character-level scanner for one `key=value` pair of a `Forwarded`
//! header element.

/// Scanner states for a single `key=value` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Whitespace before the key.
    SkipSpace,
    /// Inside the key, which runs up to the `=`.
    Key,
    /// Just past the `=`; the next character picks the value mode.
    ValueStart,
    /// Inside a double-quoted value.
    Quoted,
    /// Inside a bare token value.
    Token,
}

/// Scans one `key=value` pair from the front of `x`.
///
/// Returns the pair, if one completed, and how many bytes were consumed.
/// Keys accept any character except `=`. A value is either a bare token,
/// ended by `;`, `,`, or end of input (terminator left unconsumed), or a
/// double-quoted string, where a backslash makes the following quote a
/// literal character. Backslashes stay in the value; the closing quote is
/// consumed but excluded. A quoted value that never closes yields no pair.
///
/// The scanner itself never fails. Callers must treat a zero-byte advance
/// as the end of the current group rather than scanning again.
pub(crate) fn read_pair(x: &str) -> (Option<(&str, &str)>, usize) {
    let mut state = State::SkipSpace;
    let mut start = 0;
    let mut key = "";
    let mut prev_backslash = false;

    for (pos, c) in x.char_indices() {
        match state {
            State::SkipSpace => {
                if c.is_whitespace() {
                    continue;
                }
                start = pos;
                if c == '=' {
                    key = &x[start..pos];
                    state = State::ValueStart;
                } else {
                    state = State::Key;
                }
            }
            State::Key => {
                if c == '=' {
                    key = &x[start..pos];
                    state = State::ValueStart;
                }
            }
            State::ValueStart => match c {
                '"' => {
                    // Value starts one byte past the opening quote.
                    start = pos + 1;
                    state = State::Quoted;
                }
                ';' | ',' => {
                    // Empty value; the terminator is the caller's.
                    return (Some((key, "")), pos);
                }
                _ => {
                    start = pos;
                    state = State::Token;
                }
            },
            State::Quoted => {
                if c == '"' && !prev_backslash {
                    return (Some((key, &x[start..pos])), pos + 1);
                }
                prev_backslash = c == '\\' && !prev_backslash;
            }
            State::Token => {
                if c == ';' || c == ',' {
                    return (Some((key, &x[start..pos])), pos);
                }
            }
        }
    }

    // End of input.
    match state {
        State::Token => (Some((key, &x[start..])), x.len()),
        State::ValueStart => (Some((key, "")), x.len()),
        // No `=` seen, or a quoted value never closed: nothing to emit.
        State::SkipSpace | State::Key | State::Quoted => (None, x.len()),
    }
}
