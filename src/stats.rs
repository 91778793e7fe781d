//! Text statistics
//!
//! Computes the [`TextAnalysis`] of a string: its length, line count and word
//! count, merged with the format specifiers and directional-override flag.
//!
//! # Length
//!
//! Length is the number of Unicode scalar values (`char`s). It is the single
//! length definition used across the crate, including the translation
//! length ratio. It approximates visual width only loosely: combining marks
//! count separately and wide CJK characters count as one.

use serde::{Deserialize, Serialize};

use crate::bidi::has_directional_overrides;
use crate::specifiers::extract_specifiers;

/// Derived metrics of a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    /// Number of Unicode scalar values
    pub length: usize,
    /// Number of newline-separated segments (at least one)
    pub line_count: usize,
    /// Number of whitespace-delimited, non-empty tokens
    pub word_count: usize,
    pub has_directional_overrides: bool,
    pub format_specifiers: Vec<String>,
}

/// Count characters in the crate-wide length unit (Unicode scalar values).
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` into newline-separated segments.
///
/// Line breaks are LF, VT, FF, CR, NEL, LINE SEPARATOR and PARAGRAPH
/// SEPARATOR; a CR LF pair is one break. There is always at least one
/// segment, so the empty string yields a single empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\r' => {
                lines.push(&text[start..i]);
                start = i + 1;
                if let Some(&(j, '\n')) = chars.peek() {
                    chars.next();
                    start = j + 1;
                }
            }
            '\n' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => {
                lines.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    lines.push(&text[start..]);
    lines
}

/// Count newline-separated segments, see [`split_lines`].
pub fn line_count(text: &str) -> usize {
    split_lines(text).len()
}

/// Count whitespace-delimited tokens; runs of whitespace collapse.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Analyze `text`, combining statistics with specifier and bidi detection.
pub fn analyze_text(text: &str) -> TextAnalysis {
    TextAnalysis {
        length: text_length(text),
        line_count: line_count(text),
        word_count: word_count(text),
        has_directional_overrides: has_directional_overrides(text),
        format_specifiers: extract_specifiers(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let analysis = analyze_text("");
        assert_eq!(analysis.length, 0);
        assert_eq!(analysis.line_count, 1);
        assert_eq!(analysis.word_count, 0);
        assert!(!analysis.has_directional_overrides);
        assert!(analysis.format_specifiers.is_empty());
    }

    #[test]
    fn test_length_counts_scalars() {
        assert_eq!(text_length("hello"), 5);
        assert_eq!(text_length("مرحبا"), 5);
        assert_eq!(text_length("日本語"), 3);
        // e + COMBINING ACUTE ACCENT is two scalars
        assert_eq!(text_length("e\u{0301}"), 2);
    }

    #[test]
    fn test_line_count_variants() {
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("one\ntwo"), 2);
        assert_eq!(line_count("one\r\ntwo"), 2);
        assert_eq!(line_count("one\rtwo\nthree"), 3);
        assert_eq!(line_count("trailing\n"), 2);
        assert_eq!(line_count("\n\n"), 3);
        assert_eq!(line_count("a\u{2028}b\u{2029}c"), 3);
    }

    #[test]
    fn test_split_lines_segments() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("a\r\nb\rc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("x\u{2028}"), vec!["x", ""]);
    }

    #[test]
    fn test_word_count_collapses_whitespace() {
        assert_eq!(word_count("  hello   world  "), 2);
        assert_eq!(word_count("one\ttwo\nthree"), 3);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("Bonjour %@"), 2);
    }

    #[test]
    fn test_analyze_merges_detectors() {
        let analysis = analyze_text("Hello %@,\nyou have %d items\u{202E}");
        assert_eq!(analysis.line_count, 2);
        assert_eq!(analysis.word_count, 6);
        assert!(analysis.has_directional_overrides);
        assert_eq!(analysis.format_specifiers, vec!["%@", "%d"]);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(analyze_text("hi")).unwrap();
        assert_eq!(json["length"], 2);
        assert_eq!(json["lineCount"], 1);
        assert_eq!(json["wordCount"], 1);
        assert_eq!(json["hasDirectionalOverrides"], false);
        assert!(json["formatSpecifiers"].as_array().unwrap().is_empty());
    }
}
