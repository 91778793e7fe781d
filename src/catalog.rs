//! Xcode string catalog (`.xcstrings`) loading
//!
//! Reads the JSON catalog into a [`StringCatalog`]: every key with its
//! per-language string units and their translation state. Plural and device
//! variations carry no single string unit and are skipped.
//!
//! # Example
//!
//! ```
//! use l10n_qa::catalog::parse_catalog;
//!
//! let catalog = parse_catalog(r#"{
//!     "sourceLanguage": "en",
//!     "strings": {
//!         "Cancel": {
//!             "localizations": {
//!                 "fr": { "stringUnit": { "state": "translated", "value": "Annuler" } }
//!             }
//!         }
//!     }
//! }"#).unwrap();
//! assert_eq!(catalog.source_text("Cancel"), "Cancel");
//! assert_eq!(catalog.entries["Cancel"]["fr"].value, "Annuler");
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{QaError, QaResult};

/// One translated value of a catalog key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogUnit {
    pub value: String,
    /// Translation state as written by the editor (`translated`, `needs_review`, ...)
    pub state: Option<String>,
}

impl CatalogUnit {
    pub fn new(value: &str, state: Option<&str>) -> Self {
        CatalogUnit {
            value: value.to_string(),
            state: state.map(str::to_string),
        }
    }
}

/// A string catalog: keys mapped to their per-language values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringCatalog {
    pub source_language: String,
    // Keyed by string key and then by language
    // e.g. entries["welcome"]["fr"] = "Bienvenue"
    pub entries: BTreeMap<String, BTreeMap<String, CatalogUnit>>,
}

impl StringCatalog {
    pub fn new(source_language: &str) -> Self {
        StringCatalog {
            source_language: source_language.to_string(),
            entries: BTreeMap::new(),
        }
    }

    pub fn with_unit(&mut self, key: &str, language: &str, unit: CatalogUnit) -> &mut Self {
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(language.to_string(), unit);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All languages that appear in any entry, sorted.
    pub fn languages(&self) -> Vec<String> {
        self.entries
            .values()
            .flat_map(|units| units.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Source text of `key`.
    ///
    /// String catalogs usually omit the source-language unit and use the key
    /// itself as the source text, so the key is the fallback.
    pub fn source_text<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries
            .get(key)
            .and_then(|units| units.get(&self.source_language))
            .map(|unit| unit.value.as_str())
            .unwrap_or(key)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    #[serde(default = "default_source_language")]
    source_language: String,
    #[serde(default)]
    strings: BTreeMap<String, RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    localizations: BTreeMap<String, RawLocalization>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocalization {
    string_unit: Option<RawStringUnit>,
}

#[derive(Deserialize)]
struct RawStringUnit {
    state: Option<String>,
    #[serde(default)]
    value: String,
}

fn default_source_language() -> String {
    "en".to_string()
}

/// Parse an Xcode string catalog (`.xcstrings`) from its JSON text
///
/// The JSON has the following structure:
/// ```json
/// {
///     "sourceLanguage": "en",
///     "strings": {
///         "welcome": {
///             "localizations": {
///                 "fr": { "stringUnit": { "state": "translated", "value": "Bienvenue" } }
///             }
///         }
///     }
/// }
/// ```
///
/// Localizations without a `stringUnit` (plural or device variations) are
/// skipped. Keys without any localization are kept with no units.
pub fn parse_catalog(json: &str) -> QaResult<StringCatalog> {
    let raw: RawCatalog = serde_json::from_str(json)
        .map_err(|e| QaError::Catalog(format!("Failed to parse string catalog: {}", e)))?;

    let mut catalog = StringCatalog::new(&raw.source_language);
    for (key, entry) in raw.strings {
        let units = catalog.entries.entry(key).or_default();
        for (language, localization) in entry.localizations {
            if let Some(unit) = localization.string_unit {
                units.insert(
                    language,
                    CatalogUnit {
                        value: unit.value,
                        state: unit.state,
                    },
                );
            }
        }
    }
    Ok(catalog)
}

/// Load a string catalog from a file
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON or unexpected structure
pub fn load_catalog(path: &Path) -> QaResult<StringCatalog> {
    let content = fs::read_to_string(path).map_err(|e| {
        QaError::Catalog(format!("Failed to read file '{}': {}", path.display(), e))
    })?;
    parse_catalog(&content).map_err(|e| match e {
        QaError::Catalog(msg) => QaError::Catalog(format!("{} ({})", msg, path.display())),
        other => other,
    })
}
