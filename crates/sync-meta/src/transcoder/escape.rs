//! Backslash escaping for `key: value` payload lines.
//!
//! | Escape      | Character                                      |
//! |-------------|------------------------------------------------|
//! | `\\`        | backslash                                      |
//! | `\n` `\r` `\t` | line feed, carriage return, tab             |
//! | `\s`        | space at the start or end of a token           |
//! | `\:` `\=`   | separators inside keys                         |
//! | `\-`        | second hyphen of `--`, which comments forbid   |
//! | `\u{hex}`   | control characters, noncharacters, edge whitespace |
//!
//! Any other escaped character stands for itself.

use std::fmt::Write;

/// Escape `text` so it survives as one token of a payload line.
///
/// With `separators`, `:` and `=` are escaped too (for keys).
pub(crate) fn escape(text: &str, separators: bool) -> String {
    let count = text.chars().count();
    let mut out = String::with_capacity(text.len());
    let mut prev_dash = false;

    for (i, c) in text.chars().enumerate() {
        let edge = i == 0 || i + 1 == count;
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if edge => out.push_str("\\s"),
            ':' | '=' if separators => {
                out.push('\\');
                out.push(c);
            }
            '-' if prev_dash => out.push_str("\\-"),
            c if c.is_control()
                || c == '\u{fffe}'
                || c == '\u{ffff}'
                || (edge && c.is_whitespace()) =>
            {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
        prev_dash = c == '-';
    }

    out
}

/// Reverse of [`escape`]
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('s') => out.push(' '),
            Some('u') => {
                let rest = chars.as_str();
                match decode_code_point(rest) {
                    Some((decoded, len)) => {
                        out.push(decoded);
                        chars = rest[len..].chars();
                    }
                    None => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Decode `{hex}` at the start of `text`, returning the character and bytes consumed
fn decode_code_point(text: &str) -> Option<(char, usize)> {
    let body = text.strip_prefix('{')?;
    let end = body.find('}')?;
    let decoded = u32::from_str_radix(&body[..end], 16)
        .ok()
        .and_then(char::from_u32)?;
    Some((decoded, end + 2))
}

/// Byte offset of the first `:` or `=` not preceded by an escaping backslash
pub(crate) fn find_separator(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ':' | '=' => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", false, "plain")]
    #[case("a:b=c", true, "a\\:b\\=c")]
    #[case("a:b=c", false, "a:b=c")]
    #[case(" padded ", false, "\\spadded\\s")]
    #[case("in the middle", false, "in the middle")]
    #[case("line1\nline2\r", false, "line1\\nline2\\r")]
    #[case("back\\slash", false, "back\\\\slash")]
    #[case("a---b", false, "a-\\-\\-b")]
    #[case("bell\u{7}", false, "bell\\u{7}")]
    #[case("\u{3000}wide", false, "\\u{3000}wide")]
    fn test_escape(#[case] text: &str, #[case] separators: bool, #[case] expected: &str) {
        let escaped = escape(text, separators);
        assert_eq!(escaped, expected);
        assert!(!escaped.contains("--"));
        assert_eq!(unescape(&escaped), text);
    }

    #[test]
    fn test_unknown_and_dangling_escapes_are_literal() {
        assert_eq!(unescape("\\q"), "q");
        assert_eq!(unescape("end\\"), "end\\");
        assert_eq!(unescape("\\u{zz}"), "u{zz}");
        assert_eq!(unescape("\\u{110000}"), "u{110000}");
    }

    #[test]
    fn test_find_separator_skips_escaped() {
        assert_eq!(find_separator("a\\:b: c"), Some(4));
        assert_eq!(find_separator("a\\\\: c"), Some(3));
        assert_eq!(find_separator("a\\=b"), None);
        assert_eq!(find_separator("id=42"), Some(2));
    }
}
