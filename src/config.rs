//! Explicit configuration passed into every QA call
//!
//! There is no global state: the CLI builds one [`QaConfig`] from its flags
//! and hands it to the simulator, validator and sweep.

use serde::{Deserialize, Serialize};

use crate::language::RtlPolicy;
use crate::measure::FontDescriptor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaConfig {
    pub rtl_policy: RtlPolicy,
    /// Length ratio above which a translation is flagged as too long
    pub length_ratio_threshold: f64,
    /// Multiplier applied to the measured width for `recommendedMinWidth`
    pub width_margin: f64,
    /// Layout width used when the caller gives none
    pub default_width: f64,
    pub font: FontDescriptor,
}

impl QaConfig {
    pub const DEFAULT_LENGTH_RATIO_THRESHOLD: f64 = 1.5;
    pub const DEFAULT_WIDTH_MARGIN: f64 = 1.1;
    pub const DEFAULT_WIDTH: f64 = 375.0;

    pub fn new() -> Self {
        QaConfig {
            rtl_policy: RtlPolicy::default(),
            length_ratio_threshold: Self::DEFAULT_LENGTH_RATIO_THRESHOLD,
            width_margin: Self::DEFAULT_WIDTH_MARGIN,
            default_width: Self::DEFAULT_WIDTH,
            font: FontDescriptor::system(),
        }
    }

    pub fn with_rtl_policy(mut self, policy: RtlPolicy) -> Self {
        self.rtl_policy = policy;
        self
    }

    pub fn with_length_ratio_threshold(mut self, threshold: f64) -> Self {
        self.length_ratio_threshold = threshold;
        self
    }

    pub fn with_default_width(mut self, width: f64) -> Self {
        self.default_width = width;
        self
    }

    pub fn with_font(mut self, font: FontDescriptor) -> Self {
        self.font = font;
        self
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QaConfig::default();
        assert_eq!(config.length_ratio_threshold, 1.5);
        assert_eq!(config.width_margin, 1.1);
        assert_eq!(config.default_width, 375.0);
        assert_eq!(config.font, FontDescriptor::system());
        assert!(config.rtl_policy.is_rtl("fa"));
    }

    #[test]
    fn test_builders() {
        let config = QaConfig::new()
            .with_length_ratio_threshold(2.0)
            .with_default_width(320.0)
            .with_rtl_policy(RtlPolicy::new(["ur"]));
        assert_eq!(config.length_ratio_threshold, 2.0);
        assert_eq!(config.default_width, 320.0);
        assert!(config.rtl_policy.is_rtl("ur"));
        assert!(!config.rtl_policy.is_rtl("ar"));
    }
}
