//! Per-format value rendering.
//!
//! All literal and escaping rules live here so the three encoders stay consistent:
//!
//! | Value | CSV | JSON | XML |
//! |---|---|---|---|
//! | absent | empty | `null` | empty |
//! | bool | `true` / `false` | `true` / `false` | `true` / `false` |
//! | float | text conversion | shortest round-trip, `null` if not finite | text conversion |
//! | string | quoted when it holds the delimiter or `"` | quoted, escaped | `&`, `<`, `>` escaped |
//! | timestamp, date | text conversion | quoted text | text conversion |
//! | nested record | type name | object literal | type name |
//!
//! ## Examples
//!
//! ```rust
//! use recast::{format_value, Format, Value};
//!
//! let v = Value::from("Hello, World!");
//! assert_eq!(format_value(&v, Format::Csv), "\"Hello, World!\"");
//! assert_eq!(format_value(&v, Format::Json), "\"Hello, World!\"");
//! assert_eq!(format_value(&Value::Null, Format::Json), "null");
//! assert_eq!(format_value(&Value::from("a<b"), Format::Xml), "a&lt;b");
//! ```

use crate::{Delimiter, Number, Value};
use std::borrow::Cow;
use std::fmt;

/// A target output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Csv,
    Json,
    Xml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Csv => "CSV",
            Format::Json => "JSON",
            Format::Xml => "XML",
        })
    }
}

/// Renders one value as a token of `format`, using a comma delimiter for CSV.
#[must_use]
pub fn format_value(value: &Value, format: Format) -> String {
    match format {
        Format::Csv => csv_field(value, Delimiter::Comma),
        Format::Json => {
            let mut out = String::new();
            write_json(&mut out, value);
            out
        }
        Format::Xml => xml_text(value),
    }
}

/// Renders a CSV cell for `value`.
#[must_use]
pub fn csv_field(value: &Value, delimiter: Delimiter) -> String {
    escape_csv(&value.to_string(), delimiter).into_owned()
}

/// Wraps `s` in quotes, doubling embedded quotes, when it contains the delimiter or a quote.
///
/// # Examples
///
/// ```rust
/// use recast::format::escape_csv;
/// use recast::Delimiter;
///
/// assert_eq!(escape_csv("plain", Delimiter::Comma), "plain");
/// assert_eq!(escape_csv("say \"hi\"", Delimiter::Comma), "\"say \"\"hi\"\"\"");
/// assert_eq!(escape_csv("a,b", Delimiter::Tab), "a,b");
/// ```
#[must_use]
pub fn escape_csv(s: &str, delimiter: Delimiter) -> Cow<'_, str> {
    if s.contains(delimiter.as_char()) || s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

/// Appends the JSON literal for `value` to `output`.
pub fn write_json(output: &mut String, value: &Value) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_json_number(output, n),
        Value::String(s) => write_json_string(output, s),
        Value::Timestamp(_) | Value::Date(_) => write_json_string(output, &value.to_string()),
        Value::BigInt(bi) => output.push_str(&bi.to_string()),
        Value::Record(record) => {
            output.push('{');
            for (i, (key, field)) in record.fields().iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                write_json_string(output, key);
                output.push(':');
                write_json(output, field);
            }
            output.push('}');
        }
    }
}

fn write_json_number(output: &mut String, n: &Number) {
    if n.is_finite() {
        output.push_str(&n.to_string());
    } else {
        output.push_str("null");
    }
}

/// Appends `s` as a quoted JSON string.
///
/// Backslashes and quotes are escaped, as are control characters.
pub fn write_json_string(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000C}' => output.push_str("\\f"),
            c if (c as u32) < 0x20 => output.push_str(&format!("\\u{:04x}", c as u32)),
            c => output.push(c),
        }
    }
    output.push('"');
}

/// Renders element content for `value`; empty for an absent value.
#[must_use]
pub fn xml_text(value: &Value) -> String {
    escape_xml(&value.to_string()).into_owned()
}

/// Escapes the characters that cannot appear literally in element content.
///
/// Characters XML 1.0 forbids outright (C0 controls other than tab, line feed and
/// carriage return, U+FFFE, U+FFFF) have no escape and become U+FFFD.
///
/// ```rust
/// use recast::format::escape_xml;
///
/// assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_xml("tab\there"), "tab\there");
/// assert_eq!(escape_xml("bell\u{7}"), "bell\u{fffd}");
/// ```
#[must_use]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| matches!(c, '&' | '<' | '>') || !is_xml_char(c)) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c if !is_xml_char(c) => escaped.push(char::REPLACEMENT_CHARACTER),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn is_xml_char(c: char) -> bool {
    !matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}'
    )
}

/// `true` when `name` can be used verbatim as an element name.
///
/// Accepts letters, `_` and `:` to start, then letters, digits, `_`, `-`, `.` and `:`.
///
/// # Examples
///
/// ```rust
/// use recast::format::is_xml_name;
///
/// assert!(is_xml_name("root"));
/// assert!(is_xml_name("order-line"));
/// assert!(!is_xml_name("2nd"));
/// assert!(!is_xml_name("has space"));
/// assert!(!is_xml_name(""));
/// ```
#[must_use]
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordValue, ValueMap};
    use chrono::NaiveDate;

    #[test]
    fn test_absent_values() {
        assert_eq!(format_value(&Value::Null, Format::Csv), "");
        assert_eq!(format_value(&Value::Null, Format::Json), "null");
        assert_eq!(format_value(&Value::Null, Format::Xml), "");
    }

    #[test]
    fn test_booleans_lowercase_everywhere() {
        for format in [Format::Csv, Format::Json, Format::Xml] {
            assert_eq!(format_value(&Value::Bool(true), format), "true");
            assert_eq!(format_value(&Value::Bool(false), format), "false");
        }
    }

    #[test]
    fn test_csv_quoting() {
        assert_eq!(format_value(&Value::from(100), Format::Csv), "100");
        assert_eq!(
            format_value(&Value::from("He said \"hi\""), Format::Csv),
            "\"He said \"\"hi\"\"\""
        );
        assert_eq!(csv_field(&Value::from("a|b"), Delimiter::Pipe), "\"a|b\"");
        assert_eq!(csv_field(&Value::from("a,b"), Delimiter::Pipe), "a,b");
    }

    #[test]
    fn test_json_string_escaping_order() {
        let mut out = String::new();
        write_json_string(&mut out, "Back\\slash \"quoted\"");
        assert_eq!(out, r#""Back\\slash \"quoted\"""#);
    }

    #[test]
    fn test_json_control_characters() {
        let mut out = String::new();
        write_json_string(&mut out, "line\nbreak\u{1}");
        assert_eq!(out, r#""line\nbreak\u0001""#);
    }

    #[test]
    fn test_json_numbers() {
        assert_eq!(format_value(&Value::from(10.5), Format::Json), "10.5");
        assert_eq!(format_value(&Value::from(1e21), Format::Json), "1000000000000000000000");
        assert_eq!(format_value(&Value::from(0.1 + 0.2), Format::Json), "0.30000000000000004");
        assert_eq!(format_value(&Value::from(f64::NAN), Format::Json), "null");
        assert_eq!(format_value(&Value::from(f64::INFINITY), Format::Json), "null");
    }

    #[test]
    fn test_json_dates_are_quoted() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(format_value(&date, Format::Json), "\"2024-02-29\"");
        assert_eq!(format_value(&date, Format::Csv), "2024-02-29");
    }

    #[test]
    fn test_nested_record() {
        let mut fields = ValueMap::new();
        fields.insert("city".to_string(), Value::from("Oslo"));
        fields.insert("zip".to_string(), Value::Null);
        let value = Value::Record(RecordValue::new("Address", fields));

        assert_eq!(format_value(&value, Format::Json), r#"{"city":"Oslo","zip":null}"#);
        assert_eq!(format_value(&value, Format::Csv), "Address");
        assert_eq!(format_value(&value, Format::Xml), "Address");
    }

    #[test]
    fn test_xml_escaping() {
        assert_eq!(escape_xml("Fish & Chips <fresh>"), "Fish &amp; Chips &lt;fresh&gt;");
        assert!(matches!(escape_xml("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_xml_forbidden_characters_replaced() {
        assert_eq!(escape_xml("a\u{1}b"), "a\u{fffd}b");
        assert_eq!(escape_xml("\u{0}<\u{1f}"), "\u{fffd}&lt;\u{fffd}");
        assert_eq!(escape_xml("\u{ffff}"), "\u{fffd}");
        assert!(matches!(escape_xml("tab\tline\ncr\r"), Cow::Borrowed(_)));
        assert_eq!(format_value(&Value::from("bell\u{7}"), Format::Xml), "bell\u{fffd}");
    }
}
