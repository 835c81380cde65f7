//! Logging utilities for user-supplied text (answers, hint queries, usernames)
//! so every log record stays on a single, bounded line.

/// Longest preview kept from a user string before it is cut with an ellipsis.
const MAX_PREVIEW: usize = 120;

/// Escape a string for single-line logging:
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///   Other control characters become `\xNN`; input longer than `MAX_PREVIEW`
///   characters is truncated with `…`.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn escapes_multiline_answers() {
        assert_eq!(
            escape_log("function soma(a,b)\n{\treturn a+b}"),
            "function soma(a,b)\\n{\\treturn a+b}"
        );
    }

    #[test]
    fn truncates_long_input() {
        let long = "x".repeat(500);
        let esc = escape_log(&long);
        assert_eq!(esc.chars().count(), 121);
        assert!(esc.ends_with('…'));
    }

    #[test]
    fn hex_escapes_other_controls() {
        assert_eq!(escape_log("a\u{7}b"), "a\\x07b");
    }
}
