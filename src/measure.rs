//! Text measurement capability
//!
//! Rendering a string to find its size is a platform concern (AppKit, UIKit,
//! a browser, a terminal). The QA engine only sees the [`TextMeasurer`]
//! trait; hosts inject whichever implementation matches their target.
//!
//! [`HeuristicMeasurer`] is a platform-free estimator used by the CLI. It
//! greedily wraps words at the requested width and derives advances from the
//! terminal cell width of each grapheme cluster, so CJK text is roughly twice
//! as wide per character as Latin text and combining marks add nothing.
//!
//! # Example
//!
//! ```
//! use l10n_qa::measure::{FontDescriptor, HeuristicMeasurer, TextMeasurer};
//!
//! let measurer = HeuristicMeasurer::new();
//! let size = measurer
//!     .measure("hello", &FontDescriptor::system(), 200.0)
//!     .unwrap();
//! assert!(size.width > 0.0 && size.width <= 200.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::error::{QaError, QaResult};
use crate::stats::split_lines;

/// Font family and point size used for a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub family: String,
    pub size: f64,
}

impl FontDescriptor {
    /// Default system font size in points.
    pub const SYSTEM_FONT_SIZE: f64 = 13.0;

    pub fn new(family: &str, size: f64) -> Self {
        FontDescriptor {
            family: family.to_string(),
            size,
        }
    }

    /// The default system font at the default system size.
    pub fn system() -> Self {
        Self::new("system", Self::SYSTEM_FONT_SIZE)
    }
}

/// Rendered size of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Capability that renders text and reports its size.
///
/// Implementations may block (a synchronous OS layout call) or hop to another
/// thread internally; callers treat the call as opaque and synchronous and
/// make no reentrancy assumptions. Failures, including timeouts, are reported
/// as [`QaError::Measurement`].
pub trait TextMeasurer: Send + Sync {
    /// Measure `text` set in `font`, wrapped at `max_width`.
    fn measure(&self, text: &str, font: &FontDescriptor, max_width: f64) -> QaResult<TextSize>;

    /// Name of this measurer, used in logs.
    fn measurer_name(&self) -> &str;
}

/// Reject sizes and widths no layout engine can honour.
pub fn check_measure_request(font: &FontDescriptor, max_width: f64) -> QaResult<()> {
    if !max_width.is_finite() || max_width <= 0.0 {
        return Err(QaError::Measurement(format!(
            "Layout width must be a positive number, got {}",
            max_width
        )));
    }
    if !font.size.is_finite() || font.size <= 0.0 {
        return Err(QaError::Measurement(format!(
            "Font size must be a positive number, got {}",
            font.size
        )));
    }
    Ok(())
}

/// Platform-free size estimator based on grapheme cell widths.
#[derive(Debug, Clone)]
pub struct HeuristicMeasurer {
    /// Advance of one terminal cell, in ems
    cell_em: f64,
    /// Advance of an inter-word space, in ems
    space_em: f64,
    /// Line height, in ems
    line_height_em: f64,
}

impl HeuristicMeasurer {
    pub const CELL_EM: f64 = 0.55;
    pub const SPACE_EM: f64 = 0.28;
    pub const LINE_HEIGHT_EM: f64 = 1.2;

    pub fn new() -> Self {
        HeuristicMeasurer {
            cell_em: Self::CELL_EM,
            space_em: Self::SPACE_EM,
            line_height_em: Self::LINE_HEIGHT_EM,
        }
    }

    /// Use a monospace model where spaces are as wide as any other cell.
    pub fn monospace() -> Self {
        HeuristicMeasurer {
            space_em: Self::CELL_EM,
            ..Self::new()
        }
    }

    fn grapheme_width(&self, grapheme: &str, size: f64) -> f64 {
        grapheme.width() as f64 * self.cell_em * size
    }

    fn word_width(&self, word: &str, size: f64) -> f64 {
        word.graphemes(true)
            .map(|g| self.grapheme_width(g, size))
            .sum()
    }

    /// Greedily wrap one hard line. Returns (visual line count, widest line).
    fn wrap_line(&self, line: &str, size: f64, max_width: f64) -> (usize, f64) {
        let space = self.space_em * size;
        let mut lines = 1;
        let mut current = 0.0_f64;
        let mut widest = 0.0_f64;
        let mut line_has_words = false;

        for word in line.split_whitespace() {
            let word_width = self.word_width(word, size);
            if line_has_words && current + space + word_width <= max_width {
                current += space + word_width;
                continue;
            }
            if line_has_words {
                widest = widest.max(current);
                lines += 1;
                current = 0.0;
            }
            line_has_words = true;
            if word_width <= max_width {
                current = word_width;
                continue;
            }
            // Word wider than the line: break between grapheme clusters
            for grapheme in word.graphemes(true) {
                let advance = self.grapheme_width(grapheme, size);
                if current > 0.0 && current + advance > max_width {
                    widest = widest.max(current);
                    lines += 1;
                    current = 0.0;
                }
                current += advance;
            }
        }
        (lines, widest.max(current))
    }
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, text: &str, font: &FontDescriptor, max_width: f64) -> QaResult<TextSize> {
        check_measure_request(font, max_width)?;

        let mut total_lines = 0;
        let mut widest = 0.0_f64;
        for line in split_lines(text) {
            let (lines, width) = self.wrap_line(line, font.size, max_width);
            total_lines += lines;
            widest = widest.max(width);
        }

        let size = TextSize {
            width: widest,
            height: total_lines as f64 * self.line_height_em * font.size,
        };
        trace!(
            lines = total_lines,
            width = size.width,
            height = size.height,
            "heuristic measurement"
        );
        Ok(size)
    }

    fn measurer_name(&self) -> &str {
        "Heuristic Measurer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> FontDescriptor {
        FontDescriptor::new("system", 10.0)
    }

    #[test]
    fn test_empty_text_is_one_line() {
        let size = HeuristicMeasurer::new().measure("", &font(), 100.0).unwrap();
        assert_eq!(size.width, 0.0);
        assert!((size.height - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_word_width() {
        // 5 cells * 0.55em * 10pt
        let size = HeuristicMeasurer::new()
            .measure("hello", &font(), 200.0)
            .unwrap();
        assert!((size.width - 27.5).abs() < 1e-9);
        assert!((size.height - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_wide_graphemes_take_two_cells() {
        let measurer = HeuristicMeasurer::new();
        let latin = measurer.measure("ab", &font(), 200.0).unwrap();
        let cjk = measurer.measure("日本", &font(), 200.0).unwrap();
        assert!((cjk.width - 2.0 * latin.width).abs() < 1e-9);
    }

    #[test]
    fn test_combining_marks_add_no_width() {
        let measurer = HeuristicMeasurer::new();
        let plain = measurer.measure("e", &font(), 200.0).unwrap();
        let accented = measurer.measure("e\u{0301}", &font(), 200.0).unwrap();
        assert!((plain.width - accented.width).abs() < 1e-9);
    }

    #[test]
    fn test_wraps_at_max_width() {
        let measurer = HeuristicMeasurer::new();
        // each word is 27.5 wide, a space 2.8; two words need 57.8
        let size = measurer
            .measure("hello hello hello", &font(), 40.0)
            .unwrap();
        assert!((size.height - 36.0).abs() < 1e-9);
        assert!((size.width - 27.5).abs() < 1e-9);

        let size = measurer
            .measure("hello hello hello", &font(), 60.0)
            .unwrap();
        assert!((size.height - 24.0).abs() < 1e-9);
        assert!(size.width <= 60.0);
    }

    #[test]
    fn test_hard_breaks_overlong_word() {
        // 10 cells = 55 wide, max 20 fits 3 cells (16.5) per line → 4 lines
        let size = HeuristicMeasurer::new()
            .measure("abcdefghij", &font(), 20.0)
            .unwrap();
        assert!((size.height - 48.0).abs() < 1e-9);
        assert!(size.width <= 20.0);
    }

    #[test]
    fn test_explicit_newlines() {
        let size = HeuristicMeasurer::new()
            .measure("one\ntwo\n\nfour", &font(), 500.0)
            .unwrap();
        assert!((size.height - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_monospace_spaces() {
        let proportional = HeuristicMeasurer::new()
            .measure("a b", &font(), 500.0)
            .unwrap();
        let mono = HeuristicMeasurer::monospace()
            .measure("a b", &font(), 500.0)
            .unwrap();
        assert!(mono.width > proportional.width);
        assert!((mono.width - 16.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_requests() {
        let measurer = HeuristicMeasurer::new();
        assert!(matches!(
            measurer.measure("x", &font(), 0.0),
            Err(QaError::Measurement(_))
        ));
        assert!(matches!(
            measurer.measure("x", &font(), f64::NAN),
            Err(QaError::Measurement(_))
        ));
        assert!(matches!(
            measurer.measure("x", &FontDescriptor::new("system", -1.0), 100.0),
            Err(QaError::Measurement(_))
        ));
    }

    #[test]
    fn test_measurer_name() {
        assert_eq!(HeuristicMeasurer::new().measurer_name(), "Heuristic Measurer");
    }
}
