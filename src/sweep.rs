//! Catalog-wide QA sweep
//!
//! Runs the translation validator over every (key, language) pair of a
//! [`StringCatalog`] and sorts the findings into issue categories. Items are
//! validated concurrently with at most `jobs` tasks in flight; findings are
//! reported in key then language order regardless of completion order.
//!
//! A failure on one item (for example an empty source string) is logged,
//! recorded under `errors`, and does not stop the sweep.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::catalog::StringCatalog;
use crate::config::QaConfig;
use crate::error::{QaError, QaResult};
use crate::validate::{TranslationValidator, ValidationReport};

pub const DEFAULT_JOBS: usize = 4;
const TRANSLATED_STATE: &str = "translated";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepIssues {
    pub missing_translations: Vec<String>,
    pub length_issues: Vec<String>,
    pub format_issues: Vec<String>,
    pub rtl_issues: Vec<String>,
    pub state_issues: Vec<String>,
    pub errors: Vec<String>,
}

impl SweepIssues {
    /// Categories in reporting order, with their machine names.
    pub fn categories(&self) -> [(&'static str, &[String]); 6] {
        [
            ("missing_translations", self.missing_translations.as_slice()),
            ("length_issues", self.length_issues.as_slice()),
            ("format_issues", self.format_issues.as_slice()),
            ("rtl_issues", self.rtl_issues.as_slice()),
            ("state_issues", self.state_issues.as_slice()),
            ("errors", self.errors.as_slice()),
        ]
    }

    pub fn total(&self) -> usize {
        self.categories().iter().map(|(_, issues)| issues.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepStats {
    pub total_strings: usize,
    pub languages: Vec<String>,
    pub missing_translations: usize,
    pub issues_found: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub timestamp: DateTime<Local>,
    pub stats: SweepStats,
    pub issues: SweepIssues,
}

/// A translated value awaiting validation.
struct SweepItem {
    key: String,
    language: String,
    source: String,
    translated: String,
    state: Option<String>,
}

/// Sweep `catalog` with at most `jobs` validations in flight.
pub async fn sweep_catalog(
    catalog: &StringCatalog,
    config: &QaConfig,
    jobs: usize,
) -> QaResult<SweepReport> {
    let mut issues = SweepIssues::default();
    let mut items = Vec::new();

    for (key, units) in &catalog.entries {
        let source = catalog.source_text(key);
        for (language, unit) in units {
            if *language == catalog.source_language {
                continue;
            }
            if unit.value.is_empty() {
                issues
                    .missing_translations
                    .push(format!("Missing translation for '{}' in {}", key, language));
                continue;
            }
            items.push(SweepItem {
                key: key.clone(),
                language: language.clone(),
                source: source.to_string(),
                translated: unit.value.clone(),
                state: unit.state.clone(),
            });
        }
    }
    info!(
        keys = catalog.len(),
        items = items.len(),
        jobs,
        "sweeping string catalog"
    );

    let outcomes = validate_items(items, config, jobs).await?;
    for (item, outcome) in outcomes {
        classify(&item, outcome, config, &mut issues);
    }

    let stats = SweepStats {
        total_strings: catalog.len(),
        languages: catalog.languages(),
        missing_translations: issues.missing_translations.len(),
        issues_found: issues.total(),
    };
    info!(issues = stats.issues_found, "sweep finished");

    Ok(SweepReport {
        timestamp: Local::now(),
        stats,
        issues,
    })
}

async fn validate_items(
    items: Vec<SweepItem>,
    config: &QaConfig,
    jobs: usize,
) -> QaResult<Vec<(SweepItem, QaResult<ValidationReport>)>> {
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let validator = Arc::new(TranslationValidator::new(config.clone()));
    let mut tasks = JoinSet::new();

    for (index, item) in items.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|e| QaError::Catalog(format!("Sweep scheduler closed: {}", e)))?;
        let validator = Arc::clone(&validator);
        tasks.spawn(async move {
            let _permit = permit;
            let outcome = validator.validate(&item.source, &item.translated);
            (index, item, outcome)
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                return Err(QaError::Catalog(format!("Sweep task failed: {}", e)));
            }
        }
    }
    outcomes.sort_by_key(|(index, _, _)| *index);
    Ok(outcomes
        .into_iter()
        .map(|(_, item, outcome)| (item, outcome))
        .collect())
}

fn classify(
    item: &SweepItem,
    outcome: QaResult<ValidationReport>,
    config: &QaConfig,
    issues: &mut SweepIssues,
) {
    let (key, language) = (&item.key, &item.language);
    match outcome {
        Ok(report) => {
            if report.length_ratio > config.length_ratio_threshold {
                issues.length_issues.push(format!(
                    "Text length issue in '{}' for {}: ratio {:.2}",
                    key, language, report.length_ratio
                ));
            }
            if !report.specifiers_match {
                issues.format_issues.push(format!(
                    "Format specifier mismatch in '{}' for {}",
                    key, language
                ));
            }
        }
        Err(e) => {
            warn!(key = %key, language = %language, "validation failed: {}", e);
            issues.errors.push(format!(
                "Validation failed for '{}' in {}: {}",
                key, language, e
            ));
        }
    }

    if config.rtl_policy.is_rtl(language) {
        issues.rtl_issues.push(format!(
            "RTL considerations needed for '{}' in {}",
            key, language
        ));
    }

    if let Some(state) = item.state.as_deref() {
        if state != TRANSLATED_STATE {
            issues.state_issues.push(format!(
                "Translation state for '{}' in {} is '{}'",
                key, language, state
            ));
        }
    }
    debug!(key = %key, language = %language, "classified translation");
}
