//! Textual rendering of scalar values.
//!
//! These helpers produce the `value` field of leaf tokens. They follow the
//! host's inspection conventions closely enough that a dump reads the same
//! as the runtime's own debugger output.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

/// Bytes shown before a buffer rendering is cut short.
pub const MAX_BUFFER_BYTES: usize = 50;

/// Formats a number like the host's `Number.prototype.toString`.
///
/// # Examples
///
/// ```rust
/// use dumper::inspect::number_to_string;
///
/// assert_eq!(number_to_string(1.0), "1");
/// assert_eq!(number_to_string(-0.0), "0");
/// assert_eq!(number_to_string(f64::INFINITY), "Infinity");
/// assert_eq!(number_to_string(1e21), "1e+21");
/// ```
#[must_use]
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    value.to_string()
}

/// Formats a date as ISO-8601 with milliseconds, or `Invalid Date`.
#[must_use]
pub fn date_to_string(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => "Invalid Date".to_string(),
    }
}

/// Quotes and escapes a string, truncating it after `max_length` characters.
///
/// Single quotes are preferred. Double quotes are used when the text holds a
/// single quote but no double quote, backticks when it holds both but no
/// backtick or `${`. Otherwise single quotes are escaped.
///
/// # Examples
///
/// ```rust
/// use dumper::inspect::quote_string;
///
/// assert_eq!(quote_string("Hello world", 1000), "'Hello world'");
/// assert_eq!(quote_string("it's", 1000), "\"it's\"");
/// assert_eq!(quote_string("abcdef", 2), "'ab'... 4 more characters");
/// ```
#[must_use]
pub fn quote_string(value: &str, max_length: usize) -> String {
    let total = value.chars().count();
    let (text, remaining) = if total > max_length {
        let cut = value
            .char_indices()
            .nth(max_length)
            .map_or(value.len(), |(offset, _)| offset);
        (&value[..cut], total - max_length)
    } else {
        (value, 0)
    };

    let quote = if !text.contains('\'') {
        '\''
    } else if !text.contains('"') {
        '"'
    } else if !text.contains('`') && !text.contains("${") {
        '`'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            c if c == quote && quote == '\'' => out.push_str("\\'"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);

    if remaining > 0 {
        let _ = write!(
            out,
            "... {remaining} more character{}",
            if remaining > 1 { "s" } else { "" }
        );
    }
    out
}

/// Renders bytes as `<Buffer 68 69>`.
///
/// # Examples
///
/// ```rust
/// use dumper::inspect::inspect_buffer;
///
/// assert_eq!(inspect_buffer(b"hi"), "<Buffer 68 69>");
/// ```
#[must_use]
pub fn inspect_buffer(bytes: &[u8]) -> String {
    let shown = bytes.len().min(MAX_BUFFER_BYTES);
    let hex: Vec<String> = bytes[..shown].iter().map(|b| format!("{b:02x}")).collect();
    let mut out = format!("<Buffer {}", hex.join(" "));

    let remaining = bytes.len() - shown;
    if remaining > 0 {
        let _ = write!(
            out,
            " ... {remaining} more byte{}",
            if remaining > 1 { "s" } else { "" }
        );
    }
    out.push('>');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_quote_selection() {
        assert_eq!(quote_string("Hello world", 100), "'Hello world'");
        assert_eq!(quote_string("Hello\"world", 100), "'Hello\"world'");
        assert_eq!(quote_string("Hello\"wor'ld", 100), "`Hello\"wor'ld`");
        assert_eq!(quote_string("H`ello\"wor'ld", 100), "'H`ello\"wor\\'ld'");
        assert_eq!(quote_string("${a}\"'", 100), "'${a}\"\\''");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(quote_string("a\nb\\c", 100), "'a\\nb\\\\c'");
        assert_eq!(quote_string("\u{1}", 100), "'\\x01'");
        assert_eq!(quote_string("", 100), "''");
    }

    #[test]
    fn test_truncation_counts_characters() {
        assert_eq!(quote_string("héllo", 2), "'hé'... 3 more characters");
        assert_eq!(quote_string("ab", 1), "'a'... 1 more character");
        assert_eq!(quote_string("ab", 2), "'ab'");
    }

    #[test]
    fn test_buffer_truncation() {
        assert_eq!(inspect_buffer(&[]), "<Buffer >");
        let bytes = vec![0u8; 52];
        let rendered = inspect_buffer(&bytes);
        assert!(rendered.ends_with(" ... 2 more bytes>"));
        assert_eq!(rendered.matches("00").count(), 50);
    }

    #[test]
    fn test_numbers_and_dates() {
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(-3.0), "-3");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(1e-7), "1e-7");

        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(date_to_string(Some(&date)), "2024-01-02T03:04:05.000Z");
        assert_eq!(date_to_string(None), "Invalid Date");
    }
}
