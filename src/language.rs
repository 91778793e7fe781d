//! Language tags and text direction policy
//!
//! Right-to-left detection is deliberately a closed prefix table rather than a
//! CLDR script-directionality lookup: a tag is RTL when it starts with one of
//! the policy prefixes (case-insensitive). The default table covers Arabic,
//! Hebrew and Persian only. Callers needing Urdu, Yiddish, Syriac and so on
//! extend the table with [`RtlPolicy::with_prefix`].
//!
//! # Example
//!
//! ```
//! use l10n_qa::language::RtlPolicy;
//!
//! let policy = RtlPolicy::default();
//! assert!(policy.is_rtl("ar"));
//! assert!(policy.is_rtl("he-IL"));
//! assert!(!policy.is_rtl("en"));
//! ```

use icu_locale::Locale;
use serde::{Deserialize, Serialize};

use crate::error::{QaError, QaResult};

/// Prefix table deciding which language tags are laid out right-to-left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlPolicy {
    prefixes: Vec<String>,
}

impl RtlPolicy {
    pub const DEFAULT_PREFIXES: [&'static str; 3] = ["ar", "he", "fa"];

    /// Create a policy from an explicit prefix table.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RtlPolicy {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.into().to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Add a prefix to the table.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.to_ascii_lowercase();
        if !prefix.is_empty() && !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns true if `language` starts with any prefix of the table.
    pub fn is_rtl(&self, language: &str) -> bool {
        let language = language.to_ascii_lowercase();
        self.prefixes.iter().any(|p| language.starts_with(p.as_str()))
    }
}

impl Default for RtlPolicy {
    fn default() -> Self {
        RtlPolicy::new(Self::DEFAULT_PREFIXES)
    }
}

/// A validated language tag such as `ar`, `en-US` or `zh-Hans`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Accept any tag that is non-empty after trimming surrounding whitespace.
    ///
    /// BCP 47, POSIX (`pt_BR.UTF-8@euro`) and ad hoc tags are all taken as
    /// given; RTL detection only looks at the prefix.
    pub fn parse(tag: &str) -> QaResult<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(QaError::Parse("Language tag is empty".to_string()));
        }
        Ok(LanguageTag(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base language subtag, lowercased (`zh-Hans` → `zh`).
    ///
    /// Uses the ICU locale parser and falls back to splitting on the first
    /// separator when the tag is not well-formed BCP 47.
    pub fn base_language(&self) -> String {
        match self.0.parse::<Locale>() {
            Ok(locale) => locale.id.language.as_str().to_string(),
            Err(_) => self
                .0
                .split(['-', '_', '.', '@'])
                .next()
                .unwrap_or(&self.0)
                .to_ascii_lowercase(),
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
