//! C-style unescaping for grammar literals.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    #[error("truncated escape sequence")]
    Truncated,
    #[error("invalid escape character: {0:?}")]
    InvalidEscape(char),
    #[error("escape does not name a Unicode scalar")]
    InvalidScalar,
}

fn hex_value(chars: &mut std::str::Chars<'_>, count: usize) -> Result<u32, EscapeError> {
    let mut value = 0u32;
    for _ in 0..count {
        let c = chars.next().ok_or(EscapeError::Truncated)?;
        let digit = c.to_digit(16).ok_or(EscapeError::InvalidEscape(c))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Resolves backslash escapes: the single-character C escapes, `\xHH`,
/// up to three octal digits, `\uXXXX`, `\UXXXXXXXX`, and backslash-newline
/// line continuation.
pub fn unescape_str(input: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape = chars.next().ok_or(EscapeError::Truncated)?;
        match escape {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0C'),
            'v' => out.push('\x0B'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            '/' => out.push('/'),
            '\n' => {} // line continuation
            '\r' => {
                // CRLF continuation: swallow the LF too
                let mut ahead = chars.clone();
                if ahead.next() == Some('\n') {
                    chars = ahead;
                }
            }
            'x' => {
                let value = hex_value(&mut chars, 2)?;
                out.push(char::from_u32(value).ok_or(EscapeError::InvalidScalar)?);
            }
            'u' => {
                let value = hex_value(&mut chars, 4)?;
                out.push(char::from_u32(value).ok_or(EscapeError::InvalidScalar)?);
            }
            'U' => {
                let value = hex_value(&mut chars, 8)?;
                out.push(char::from_u32(value).ok_or(EscapeError::InvalidScalar)?);
            }
            '0'..='7' => {
                let mut value = escape.to_digit(8).expect("octal digit");
                for _ in 0..2 {
                    let mut ahead = chars.clone();
                    match ahead.next().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars = ahead;
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).ok_or(EscapeError::InvalidScalar)?);
            }
            other => return Err(EscapeError::InvalidEscape(other)),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(unescape_str("hello").unwrap(), "hello");
        assert_eq!(unescape_str("").unwrap(), "");
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(unescape_str(r"a\nb\t\\").unwrap(), "a\nb\t\\");
        assert_eq!(unescape_str(r#"\""#).unwrap(), "\"");
    }

    #[test]
    fn numeric_escapes() {
        assert_eq!(unescape_str(r"\x41").unwrap(), "A");
        assert_eq!(unescape_str(r"\101").unwrap(), "A");
        assert_eq!(unescape_str(r"\0").unwrap(), "\0");
        assert_eq!(unescape_str(r"\u00e9").unwrap(), "é");
        assert_eq!(unescape_str(r"\U0001F600").unwrap(), "😀");
    }

    #[test]
    fn line_continuation() {
        assert_eq!(unescape_str("a\\\nb").unwrap(), "ab");
        assert_eq!(unescape_str("a\\\r\nb").unwrap(), "ab");
    }

    #[test]
    fn bad_escapes() {
        assert_eq!(unescape_str("\\"), Err(EscapeError::Truncated));
        assert_eq!(unescape_str(r"\q"), Err(EscapeError::InvalidEscape('q')));
        assert_eq!(unescape_str(r"\x4"), Err(EscapeError::Truncated));
        assert_eq!(unescape_str(r"\ud800"), Err(EscapeError::InvalidScalar));
    }
}
