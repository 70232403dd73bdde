//! Text processing utilities.
//!
//! This module contains the small parsing helpers shared by the link parser
//! and the REST error classification: lenient integer parsing the way the
//! tracker's templates emit numbers, and extraction of double-quoted
//! substrings from server error messages.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("invalid leading integer regex"));

static DOUBLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(.*?)""#).expect("invalid double quoted regex"));

/// Parse the integer prefix of a string.
///
/// Leading whitespace and a sign are accepted and anything after the digits
/// is ignored, so `"400px"` parses as `400`. Returns `None` when the string
/// does not start with a number.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INTEGER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Return every double-quoted substring of `text`, in order of appearance.
///
/// # Arguments
/// * `text` - The text to scan, typically a REST error message
///
/// # Returns
/// The quoted contents without the surrounding quotes.
pub fn double_quoted(text: &str) -> Vec<String> {
    DOUBLE_QUOTED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int_plain() {
        assert_eq!(parse_leading_int("400"), Some(400));
        assert_eq!(parse_leading_int("0"), Some(0));
    }

    #[test]
    fn test_parse_leading_int_with_suffix_and_whitespace() {
        assert_eq!(parse_leading_int("  600px"), Some(600));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+12abc"), Some(12));
    }

    #[test]
    fn test_parse_leading_int_rejects_non_numbers() {
        assert_eq!(parse_leading_int("wide"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("px400"), None);
    }

    #[test]
    fn test_double_quoted_value_and_field() {
        let quoted = double_quoted(r#"Value "bogus" is invalid for "status""#);
        assert_eq!(quoted, vec!["bogus".to_string(), "status".to_string()]);
    }

    #[test]
    fn test_double_quoted_empty_value() {
        let quoted = double_quoted(r#"Value "" is invalid for "priority""#);
        assert_eq!(quoted, vec!["".to_string(), "priority".to_string()]);
    }

    #[test]
    fn test_double_quoted_no_matches() {
        assert!(double_quoted("Permission denied").is_empty());
    }
}
