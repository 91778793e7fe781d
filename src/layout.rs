//! Layout simulation
//!
//! Combines RTL detection, one call to the injected [`TextMeasurer`] and the
//! text statistics into a [`LayoutSimulation`] describing how a string would
//! render at a given width.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::QaConfig;
use crate::error::{QaError, QaResult};
use crate::language::LanguageTag;
use crate::measure::TextMeasurer;
use crate::stats::{TextAnalysis, analyze_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSimulation {
    /// Measured rendered width
    pub width: f64,
    /// Measured rendered height
    pub height: f64,
    #[serde(rename = "isRTL")]
    pub is_rtl: bool,
    /// Measured width plus the safety margin, rounded up
    pub recommended_min_width: f64,
    pub text_analysis: TextAnalysis,
}

/// Simulates rendering of localized strings through a [`TextMeasurer`].
pub struct LayoutSimulator<M: TextMeasurer> {
    measurer: M,
    config: QaConfig,
}

impl<M: TextMeasurer> LayoutSimulator<M> {
    pub fn new(measurer: M, config: QaConfig) -> Self {
        LayoutSimulator { measurer, config }
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Simulate `text` in `language` laid out within `width`.
    ///
    /// The measurer is called exactly once; its failure is returned as is,
    /// without retry or a default size.
    pub fn simulate(&self, language: &str, text: &str, width: f64) -> QaResult<LayoutSimulation> {
        let language = LanguageTag::parse(language)?;
        if !width.is_finite() || width <= 0.0 {
            return Err(QaError::Parse(format!(
                "Layout width must be a positive number, got {}",
                width
            )));
        }

        let is_rtl = self.config.rtl_policy.is_rtl(language.as_str());
        let size = self
            .measurer
            .measure(text, &self.config.font, width)
            .inspect_err(|e| {
                warn!(
                    measurer = self.measurer.measurer_name(),
                    "measurement failed: {}", e
                )
            })?;
        check_measured_size(size.width, size.height).inspect_err(|e| {
            warn!(
                measurer = self.measurer.measurer_name(),
                "measurement rejected: {}", e
            )
        })?;

        let recommended_min_width = recommended_min_width(size.width, self.config.width_margin);
        debug!(
            language = %language,
            base_language = %language.base_language(),
            is_rtl,
            width = size.width,
            height = size.height,
            recommended_min_width,
            "simulated layout"
        );

        Ok(LayoutSimulation {
            width: size.width,
            height: size.height,
            is_rtl,
            recommended_min_width,
            text_analysis: analyze_text(text),
        })
    }

    /// Simulate at the configured default width.
    pub fn simulate_default(&self, language: &str, text: &str) -> QaResult<LayoutSimulation> {
        self.simulate(language, text, self.config.default_width)
    }
}

/// A measurer reporting a NaN, infinite or negative size has failed.
fn check_measured_size(width: f64, height: f64) -> QaResult<()> {
    if !width.is_finite() || width < 0.0 || !height.is_finite() || height < 0.0 {
        return Err(QaError::Measurement(format!(
            "Measurer returned an invalid size {} x {}",
            width, height
        )));
    }
    Ok(())
}

/// `ceil(width * margin)`, never below the measured width itself.
pub fn recommended_min_width(measured_width: f64, margin: f64) -> f64 {
    (measured_width * margin).max(measured_width).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::HeuristicMeasurer;
    use crate::mock::{MockMeasureMode, MockMeasurer};

    fn fixed(width: f64, height: f64) -> LayoutSimulator<MockMeasurer> {
        LayoutSimulator::new(
            MockMeasurer::new(MockMeasureMode::Fixed { width, height }),
            QaConfig::default(),
        )
    }

    #[test]
    fn test_rtl_detection() {
        let simulator = LayoutSimulator::new(HeuristicMeasurer::new(), QaConfig::default());
        assert!(simulator.simulate("ar", "مرحبا", 200.0).unwrap().is_rtl);
        assert!(!simulator.simulate("en", "hello", 200.0).unwrap().is_rtl);
        assert!(simulator.simulate("he-IL", "שלום", 200.0).unwrap().is_rtl);
        assert!(!simulator.simulate("en@US", "hello", 200.0).unwrap().is_rtl);
    }

    #[test]
    fn test_recommended_width_margin() {
        let simulation = fixed(52.5, 16.0).simulate("en", "hello", 375.0).unwrap();
        assert_eq!(simulation.width, 52.5);
        assert_eq!(simulation.height, 16.0);
        // 52.5 * 1.1 = 57.75 → 58
        assert_eq!(simulation.recommended_min_width, 58.0);

        let simulation = fixed(37.3, 16.0).simulate("en", "hi", 375.0).unwrap();
        // 37.3 * 1.1 = 41.03 → 42
        assert_eq!(simulation.recommended_min_width, 42.0);
    }

    #[test]
    fn test_recommended_width_never_below_measured() {
        assert_eq!(recommended_min_width(0.0, 1.1), 0.0);
        assert_eq!(recommended_min_width(10.5, 0.5), 11.0);
        assert!(recommended_min_width(99.9, 1.1) >= 99.9);
    }

    #[test]
    fn test_text_analysis_included() {
        let simulation = fixed(10.0, 10.0)
            .simulate("fr", "Bonjour %@\nça va?", 375.0)
            .unwrap();
        assert_eq!(simulation.text_analysis.line_count, 2);
        assert_eq!(simulation.text_analysis.format_specifiers, vec!["%@"]);
    }

    #[test]
    fn test_measurer_called_once() {
        let simulator = fixed(10.0, 10.0);
        simulator.simulate("en", "hello", 375.0).unwrap();
        assert_eq!(simulator.measurer().call_count(), 1);
    }

    #[test]
    fn test_measurement_error_propagates() {
        let simulator = LayoutSimulator::new(
            MockMeasurer::new(MockMeasureMode::Error("layout engine unavailable".to_string())),
            QaConfig::default(),
        );
        assert_eq!(
            simulator.simulate("en", "hello", 375.0),
            Err(QaError::Measurement("layout engine unavailable".to_string()))
        );
    }

    #[test]
    fn test_invalid_measured_size_is_measurement_error() {
        for (width, height) in [
            (f64::NAN, 16.0),
            (52.5, f64::NAN),
            (f64::INFINITY, 16.0),
            (-20.0, -1.0),
            (20.0, -1.0),
        ] {
            let simulator = fixed(width, height);
            assert!(
                matches!(
                    simulator.simulate("en", "hello", 375.0),
                    Err(QaError::Measurement(_))
                ),
                "size {} x {} should be rejected",
                width,
                height
            );
            assert_eq!(simulator.measurer().call_count(), 1);
        }
        // Zero is a valid size
        assert!(fixed(0.0, 0.0).simulate("en", "", 375.0).is_ok());
    }

    #[test]
    fn test_invalid_inputs() {
        let simulator = fixed(10.0, 10.0);
        assert!(matches!(
            simulator.simulate("", "hello", 375.0),
            Err(QaError::Parse(_))
        ));
        assert!(matches!(
            simulator.simulate("en", "hello", 0.0),
            Err(QaError::Parse(_))
        ));
        assert!(matches!(
            simulator.simulate("en", "hello", f64::INFINITY),
            Err(QaError::Parse(_))
        ));
        // Rejected before the measurer is reached
        assert_eq!(simulator.measurer().call_count(), 0);
    }

    #[test]
    fn test_empty_text() {
        let simulator = LayoutSimulator::new(HeuristicMeasurer::new(), QaConfig::default());
        let simulation = simulator.simulate("en", "", 375.0).unwrap();
        assert_eq!(simulation.width, 0.0);
        assert!(simulation.height > 0.0);
        assert_eq!(simulation.recommended_min_width, 0.0);
        assert_eq!(simulation.text_analysis.line_count, 1);
    }

    #[test]
    fn test_simulate_default_width() {
        let simulator = LayoutSimulator::new(
            MockMeasurer::new(MockMeasureMode::PerChar {
                advance: 1.0,
                line_height: 1.0,
            }),
            QaConfig::default(),
        );
        let simulation = simulator.simulate_default("en", "hello").unwrap();
        assert_eq!(simulation.width, 5.0);
    }

    #[test]
    fn test_serialized_keys() {
        let simulation = fixed(52.5, 16.0).simulate("ar", "x", 375.0).unwrap();
        let json = serde_json::to_value(&simulation).unwrap();
        assert_eq!(json["isRTL"], true);
        assert_eq!(json["recommendedMinWidth"], 58.0);
        assert_eq!(json["textAnalysis"]["length"], 1);
    }
}
