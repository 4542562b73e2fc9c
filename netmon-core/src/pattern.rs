//! Lazily compiled regular expressions for parsing platform text dumps.
//!
//! Patterns are compiled on first use. A pattern that fails to compile
//! behaves as one that never matches, so parsing stays total.

use std::sync::LazyLock;

use regex::Regex;

/// A regular expression compiled on first use.
pub(crate) type LazyRegex = LazyLock<Result<Regex, regex::Error>>;

/// First capture group of the first match of `re` in `text`.
pub(crate) fn first_capture<'t>(re: &LazyRegex, text: &'t str) -> Option<&'t str> {
    let re = re.as_ref().ok()?;
    re.captures(text)?.get(1).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    static DIGITS: LazyRegex = LazyLock::new(|| Regex::new(r"id=([0-9]+)"));
    static BROKEN: LazyRegex = LazyLock::new(|| Regex::new(r"id=([0-9]+"));

    #[test]
    fn test_first_capture() {
        assert_eq!(first_capture(&DIGITS, "x,id=42,y"), Some("42"));
        assert_eq!(first_capture(&DIGITS, "x,y"), None);
    }

    #[test]
    fn test_broken_pattern_never_matches() {
        assert!(BROKEN.is_err());
        assert_eq!(first_capture(&BROKEN, "id=42"), None);
    }
}
