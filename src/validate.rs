//! Translation validation
//!
//! Compares a source string with its translation and synthesizes a
//! recommendation for translators. Recommendations come from a fixed, ordered
//! list of rules; each rule looks at the computed facts and may append one
//! message. The order never changes, so the same input always yields the
//! same recommendation text.
//!
//! Rules, in order:
//!
//! 1. length ratio above the threshold (1.5 by default)
//! 2. format specifiers differ in content or order
//! 3. the translation introduces directional override characters
//!
//! # Example
//!
//! ```
//! use l10n_qa::validate::validate_translation;
//!
//! let report = validate_translation("Hi %@", "Bonjour %@, comment allez-vous aujourd'hui").unwrap();
//! assert!(report.specifiers_match);
//! assert!(report.length_ratio > 1.5);
//! assert!(report.recommendation.contains("longer than source"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::QaConfig;
use crate::error::{QaError, QaResult};
use crate::specifiers::specifiers_match;
use crate::stats::{TextAnalysis, analyze_text};

pub const NO_ISSUES: &str = "No issues found";
pub const SPECIFIER_MISMATCH: &str = "Format specifiers don't match - please verify";
pub const BIDI_OVERRIDE_ADDED: &str =
    "Translation adds directional override characters - verify bidi rendering";
const SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Translated length divided by source length, in Unicode scalar values
    pub length_ratio: f64,
    pub specifiers_match: bool,
    pub source_specifiers: Vec<String>,
    pub translated_specifiers: Vec<String>,
    pub source: TextAnalysis,
    pub translated: TextAnalysis,
    pub recommendation: String,
}

/// Facts the recommendation rules are evaluated against.
struct Facts<'a> {
    length_ratio: f64,
    specifiers_match: bool,
    source: &'a TextAnalysis,
    translated: &'a TextAnalysis,
}

type Rule = fn(&Facts<'_>, &QaConfig) -> Option<String>;

const RULES: [Rule; 3] = [length_rule, specifier_rule, bidi_rule];

fn length_rule(facts: &Facts<'_>, config: &QaConfig) -> Option<String> {
    if facts.length_ratio > config.length_ratio_threshold {
        Some(length_warning(facts.length_ratio))
    } else {
        None
    }
}

fn specifier_rule(facts: &Facts<'_>, _config: &QaConfig) -> Option<String> {
    (!facts.specifiers_match).then(|| SPECIFIER_MISMATCH.to_string())
}

fn bidi_rule(facts: &Facts<'_>, _config: &QaConfig) -> Option<String> {
    (facts.translated.has_directional_overrides && !facts.source.has_directional_overrides)
        .then(|| BIDI_OVERRIDE_ADDED.to_string())
}

/// The length warning text for a given ratio.
pub fn length_warning(length_ratio: f64) -> String {
    format!(
        "Translation is {}% longer than source - consider shortening",
        (length_ratio * 100.0).round() as i64
    )
}

/// Validates translations against their source strings.
#[derive(Debug, Clone, Default)]
pub struct TranslationValidator {
    config: QaConfig,
}

impl TranslationValidator {
    pub fn new(config: QaConfig) -> Self {
        TranslationValidator { config }
    }

    /// Validate `translated` against `source`.
    ///
    /// Fails with [`QaError::Division`] when `source` is empty, since the
    /// length ratio is undefined.
    pub fn validate(&self, source: &str, translated: &str) -> QaResult<ValidationReport> {
        let source_analysis = analyze_text(source);
        let translated_analysis = analyze_text(translated);

        if source_analysis.length == 0 {
            return Err(QaError::Division(
                "Cannot compute length ratio: source string is empty".to_string(),
            ));
        }
        let length_ratio = translated_analysis.length as f64 / source_analysis.length as f64;
        let matched = specifiers_match(
            &source_analysis.format_specifiers,
            &translated_analysis.format_specifiers,
        );

        let facts = Facts {
            length_ratio,
            specifiers_match: matched,
            source: &source_analysis,
            translated: &translated_analysis,
        };
        let messages: Vec<String> = RULES
            .iter()
            .filter_map(|rule| rule(&facts, &self.config))
            .collect();
        debug!(
            length_ratio,
            specifiers_match = matched,
            issues = messages.len(),
            "validated translation"
        );

        let recommendation = if messages.is_empty() {
            NO_ISSUES.to_string()
        } else {
            messages.join(SEPARATOR)
        };

        Ok(ValidationReport {
            length_ratio,
            specifiers_match: matched,
            source_specifiers: source_analysis.format_specifiers.clone(),
            translated_specifiers: translated_analysis.format_specifiers.clone(),
            source: source_analysis,
            translated: translated_analysis,
            recommendation,
        })
    }
}

/// Validate with the default configuration.
pub fn validate_translation(source: &str, translated: &str) -> QaResult<ValidationReport> {
    TranslationValidator::default().validate(source, translated)
}
