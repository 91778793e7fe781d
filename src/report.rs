//! Report assembly
//!
//! Turns the results of analysis, validation and layout simulation into
//! JSON values, one per CLI mode, or a combined map for callers that want
//! several at once.

use serde_json::{Map, Value};

use crate::config::QaConfig;
use crate::error::{QaError, QaResult};
use crate::layout::LayoutSimulator;
use crate::measure::TextMeasurer;
use crate::stats::analyze_text;
use crate::validate::TranslationValidator;

/// One report request, matching a CLI mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRequest {
    Analyze { text: String, width: f64 },
    Validate { source: String, translation: String },
    Layout { language: String, text: String, width: Option<f64> },
}

impl ReportRequest {
    /// Key under which this request's result appears in a combined report.
    pub fn key(&self) -> &'static str {
        match self {
            ReportRequest::Analyze { .. } => "analysis",
            ReportRequest::Validate { .. } => "validation",
            ReportRequest::Layout { .. } => "layout",
        }
    }
}

pub struct ReportBuilder<M: TextMeasurer> {
    simulator: LayoutSimulator<M>,
    validator: TranslationValidator,
}

impl<M: TextMeasurer> ReportBuilder<M> {
    pub fn new(measurer: M, config: QaConfig) -> Self {
        ReportBuilder {
            validator: TranslationValidator::new(config.clone()),
            simulator: LayoutSimulator::new(measurer, config),
        }
    }

    /// Build the JSON value for a single request.
    pub fn build(&self, request: &ReportRequest) -> QaResult<Value> {
        match request {
            ReportRequest::Analyze { text, width } => {
                if !width.is_finite() || *width <= 0.0 {
                    return Err(QaError::Parse(format!(
                        "Width must be a positive number, got {}",
                        width
                    )));
                }
                to_value(&analyze_text(text))
            }
            ReportRequest::Validate {
                source,
                translation,
            } => to_value(&self.validator.validate(source, translation)?),
            ReportRequest::Layout {
                language,
                text,
                width,
            } => {
                let simulation = match width {
                    Some(width) => self.simulator.simulate(language, text, *width)?,
                    None => self.simulator.simulate_default(language, text)?,
                };
                to_value(&simulation)
            }
        }
    }

    /// Build a map keyed by `analysis`, `validation` and `layout` holding
    /// the result of each request. A later request of the same mode replaces
    /// an earlier one.
    pub fn build_combined(&self, requests: &[ReportRequest]) -> QaResult<Map<String, Value>> {
        let mut report = Map::new();
        for request in requests {
            report.insert(request.key().to_string(), self.build(request)?);
        }
        Ok(report)
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> QaResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| QaError::Serialization(format!("Failed to serialize report: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMeasureMode, MockMeasurer};

    fn builder() -> ReportBuilder<MockMeasurer> {
        ReportBuilder::new(
            MockMeasurer::new(MockMeasureMode::Fixed {
                width: 52.5,
                height: 16.0,
            }),
            QaConfig::default(),
        )
    }

    #[test]
    fn test_analyze_report() {
        let value = builder()
            .build(&ReportRequest::Analyze {
                text: "Hello %@".to_string(),
                width: 375.0,
            })
            .unwrap();
        assert_eq!(value["length"], 8);
        assert_eq!(value["wordCount"], 2);
        assert_eq!(value["formatSpecifiers"][0], "%@");
    }

    #[test]
    fn test_analyze_rejects_bad_width() {
        let result = builder().build(&ReportRequest::Analyze {
            text: "x".to_string(),
            width: -3.0,
        });
        assert!(matches!(result, Err(QaError::Parse(_))));
    }

    #[test]
    fn test_validate_report() {
        let value = builder()
            .build(&ReportRequest::Validate {
                source: "Hi".to_string(),
                translation: "Hi".to_string(),
            })
            .unwrap();
        assert_eq!(value["lengthRatio"], 1.0);
        assert_eq!(value["recommendation"], "No issues found");
    }

    #[test]
    fn test_validate_report_propagates_division_error() {
        let result = builder().build(&ReportRequest::Validate {
            source: String::new(),
            translation: "x".to_string(),
        });
        assert!(matches!(result, Err(QaError::Division(_))));
    }

    #[test]
    fn test_layout_report() {
        let value = builder()
            .build(&ReportRequest::Layout {
                language: "fa".to_string(),
                text: "سلام".to_string(),
                width: None,
            })
            .unwrap();
        assert_eq!(value["isRTL"], true);
        assert_eq!(value["width"], 52.5);
        assert_eq!(value["recommendedMinWidth"], 58.0);
    }

    #[test]
    fn test_combined_report() {
        let report = builder()
            .build_combined(&[
                ReportRequest::Analyze {
                    text: "a b".to_string(),
                    width: 100.0,
                },
                ReportRequest::Layout {
                    language: "en".to_string(),
                    text: "a b".to_string(),
                    width: Some(100.0),
                },
            ])
            .unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report["analysis"]["wordCount"], 2);
        assert_eq!(report["layout"]["isRTL"], false);
        assert!(!report.contains_key("validation"));
    }
}
