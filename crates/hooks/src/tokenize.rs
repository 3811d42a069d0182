//! Command-line splitting
//!
//! Splits a hook's `EXEC` value into argv-style words when the hook is about
//! to run. Splitting failures are a hard error on a channel of their own:
//! the hook already parsed, the command line is simply unusable. They are
//! never folded back into parse diagnostics.

use std::borrow::Cow;
use thiserror::Error;

/// Errors produced while splitting a command line
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    /// A quoted span was opened but never closed
    #[error("unterminated {0} quote in command line")]
    UnterminatedQuote(char),
}

fn is_quote(byte: u8) -> bool {
    matches!(byte, b'\'' | b'"')
}

/// Append a verbatim segment to the word being rewritten, switching the
/// word into rewrite mode on first use.
fn flush(buf: &mut Option<String>, segment: &str) {
    buf.get_or_insert_with(String::new).push_str(segment);
}

/// Split a command string into words.
///
/// Words are delimited by runs of unescaped whitespace. `'` and `"` open
/// quoted spans that are copied verbatim without the quote characters
/// themselves; a backslash immediately followed by a quote character
/// (inside or outside quotes) escapes that character. A backslash followed
/// by anything else is an ordinary byte.
///
/// Words that needed no rewriting borrow from the input; only words with
/// quoting or escaping are copied.
///
/// # Errors
///
/// Returns an error if a quoted span is never closed. No partial result is
/// produced.
pub fn split(command: &str) -> Result<Vec<Cow<'_, str>>, SplitError> {
    let bytes = command.as_bytes();
    let len = bytes.len();
    let mut words = Vec::new();
    let mut i = 0;

    while i < len {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        // Start of the verbatim segment not yet copied into `buf`
        let mut segment = i;
        let mut buf: Option<String> = None;
        let mut quote: Option<u8> = None;

        while i < len {
            let byte = bytes[i];
            if let Some(open) = quote {
                if byte == open {
                    flush(&mut buf, &command[segment..i]);
                    quote = None;
                    i += 1;
                    segment = i;
                } else if byte == b'\\' && i + 1 < len && is_quote(bytes[i + 1]) {
                    flush(&mut buf, &command[segment..i]);
                    // Drop the backslash; the quote character itself opens
                    // the next verbatim segment
                    i += 1;
                    segment = i;
                    i += 1;
                } else {
                    i += 1;
                }
            } else if byte.is_ascii_whitespace() {
                break;
            } else if is_quote(byte) {
                flush(&mut buf, &command[segment..i]);
                quote = Some(byte);
                i += 1;
                segment = i;
            } else if byte == b'\\' && i + 1 < len && is_quote(bytes[i + 1]) {
                flush(&mut buf, &command[segment..i]);
                i += 1;
                segment = i;
                i += 1;
            } else {
                i += 1;
            }
        }

        if let Some(open) = quote {
            return Err(SplitError::UnterminatedQuote(open as char));
        }

        let word = match buf {
            Some(mut word) => {
                word.push_str(&command[segment..i]);
                Cow::Owned(word)
            }
            None => Cow::Borrowed(&command[start..i]),
        };
        words.push(word);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn words(command: &str) -> Vec<String> {
        split(command)
            .unwrap()
            .into_iter()
            .map(Cow::into_owned)
            .collect()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(words("/bin/true"), vec!["/bin/true"]);
        assert_eq!(words("ldconfig -r /"), vec!["ldconfig", "-r", "/"]);
    }

    #[test]
    fn test_whitespace_runs_collapsed() {
        assert_eq!(words("  foo\t\tbar  "), vec!["foo", "bar"]);
        assert_eq!(words(""), Vec::<String>::new());
        assert_eq!(words("   "), Vec::<String>::new());
    }

    #[test]
    fn test_double_quoted_span() {
        assert_eq!(words(r#"foo "bar baz" qux"#), vec!["foo", "bar baz", "qux"]);
    }

    #[test]
    fn test_single_quoted_span() {
        assert_eq!(words("echo 'a  b'"), vec!["echo", "a  b"]);
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        assert_eq!(words(r"foo 'it\'s'"), vec!["foo", "it's"]);
        assert_eq!(words(r#"say "a \" b""#), vec!["say", r#"a " b"#]);
    }

    #[test]
    fn test_escaped_quote_outside_quotes() {
        assert_eq!(words(r#"foo\"bar"#), vec![r#"foo"bar"#]);
    }

    #[test]
    fn test_backslash_is_literal_before_other_bytes() {
        assert_eq!(words(r"a\b c\\d"), vec![r"a\b", r"c\\d"]);
        assert_eq!(words(r"trailing\"), vec![r"trailing\"]);
    }

    #[test]
    fn test_quotes_glue_adjacent_spans() {
        assert_eq!(words(r#"pre"mid"post"#), vec!["premidpost"]);
        assert_eq!(words(r#"""empty"#), vec!["empty"]);
        assert_eq!(words(r#""""#), vec![""]);
    }

    #[test]
    fn test_mixed_quote_kinds() {
        assert_eq!(words(r#"'a "b"' c"#), vec![r#"a "b""#, "c"]);
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        assert_eq!(
            split(r#"foo "bar"#),
            Err(SplitError::UnterminatedQuote('"'))
        );
        assert_eq!(split("foo 'bar"), Err(SplitError::UnterminatedQuote('\'')));
    }

    #[test]
    fn test_unquoted_words_borrow_from_input() {
        let command = r#"foo "bar baz" qux"#;
        let split = split(command).unwrap();
        assert!(matches!(split[0], Cow::Borrowed(_)));
        assert!(matches!(split[1], Cow::Owned(_)));
        assert!(matches!(split[2], Cow::Borrowed(_)));
    }

    #[test]
    fn test_non_ascii_content_survives_rewrite() {
        assert_eq!(words("echo 'héllo wörld'"), vec!["echo", "héllo wörld"]);
    }
}
