//! Mock text measurer for testing
//!
//! Deterministic, platform-free measurer for exercising layout simulation
//! without a real layout engine.
//!
//! # Example
//!
//! ```
//! use l10n_qa::measure::{FontDescriptor, TextMeasurer};
//! use l10n_qa::mock::{MockMeasureMode, MockMeasurer};
//!
//! let mock = MockMeasurer::new(MockMeasureMode::Fixed { width: 120.0, height: 16.0 });
//! let size = mock.measure("anything", &FontDescriptor::system(), 375.0).unwrap();
//! assert_eq!(size.width, 120.0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{QaError, QaResult};
use crate::measure::{FontDescriptor, TextMeasurer, TextSize};

/// Mock measurement modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMeasureMode {
    /// Always report the same size regardless of input
    Fixed { width: f64, height: f64 },

    /// Every scalar value advances by `advance`, no wrapping; height is
    /// `line_height` per newline-separated line
    PerChar { advance: f64, line_height: f64 },

    /// Simulate an unavailable layout engine
    Error(String),
}

/// Mock measurer that records how often it was called.
#[derive(Debug)]
pub struct MockMeasurer {
    mode: MockMeasureMode,
    calls: AtomicUsize,
}

impl MockMeasurer {
    pub fn new(mode: MockMeasureMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `measure` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextMeasurer for MockMeasurer {
    fn measure(&self, text: &str, _font: &FontDescriptor, _max_width: f64) -> QaResult<TextSize> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.mode {
            MockMeasureMode::Fixed { width, height } => Ok(TextSize {
                width: *width,
                height: *height,
            }),
            MockMeasureMode::PerChar {
                advance,
                line_height,
            } => {
                let lines = crate::stats::split_lines(text);
                let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
                Ok(TextSize {
                    width: longest as f64 * advance,
                    height: lines.len() as f64 * line_height,
                })
            }
            MockMeasureMode::Error(msg) => Err(QaError::Measurement(msg.clone())),
        }
    }

    fn measurer_name(&self) -> &str {
        "Mock Measurer"
    }
}
