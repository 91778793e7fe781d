//! Format specifier extraction
//!
//! Finds printf-style placeholders such as `%@`, `%d`, `%2f` or `%s` in a
//! message. A specifier is a `%`, optional width/precision digits, then one
//! of the conversion letters `@`, `d`, `f`, `s`.
//!
//! # Example
//!
//! ```
//! use l10n_qa::specifiers::extract_specifiers;
//!
//! let specs = extract_specifiers("Hello %@, you have %d items");
//! assert_eq!(specs, vec!["%@", "%d"]);
//! ```

use regex::Regex;
use std::sync::LazyLock;

static SPECIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[0-9]*[@dfs]").expect("specifier pattern is a valid literal"));

/// Extract all format specifiers from `text`.
///
/// Matches are returned left to right, duplicates preserved. The scan is
/// leftmost-first and non-overlapping, so `%%d` yields a single `%d`
/// starting at the second `%`.
pub fn extract_specifiers(text: &str) -> Vec<String> {
    SPECIFIER_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Check whether two specifier sequences agree in both content and order.
///
/// Reordered specifiers count as a mismatch because position usually
/// encodes argument order.
pub fn specifiers_match(source: &[String], translated: &[String]) -> bool {
    source == translated
}
