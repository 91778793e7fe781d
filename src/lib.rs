//! Localization QA helpers
//!
//! Checks a translated UI string against its source before it ships:
//!
//! 1. **Format specifiers** - printf-style placeholders (`%@`, `%d`, `%2f`, `%s`)
//!    must survive translation in the same order
//! 2. **Directional overrides** - invisible bidi control characters that change
//!    how mixed-direction text renders
//! 3. **Text statistics** - length, line and word counts
//! 4. **Layout simulation** - measured size of a string through a pluggable
//!    [`TextMeasurer`], with a recommended minimum container width
//! 5. **Translation validation** - length ratio, specifier parity and a
//!    human-readable recommendation
//! 6. **Catalog sweeps** - every translation of an `.xcstrings` catalog,
//!    grouped into issue categories and rendered as console, Markdown or JSON
//!
//! # Example
//!
//! ```
//! use l10n_qa::{HeuristicMeasurer, LayoutSimulator, QaConfig, validate_translation};
//!
//! let report = validate_translation("Delete %d files?", "%d Dateien löschen?").unwrap();
//! assert!(report.specifiers_match);
//!
//! let simulator = LayoutSimulator::new(HeuristicMeasurer::new(), QaConfig::default());
//! let layout = simulator.simulate("ar", "مرحبا بالعالم", 375.0).unwrap();
//! assert!(layout.is_rtl);
//! assert!(layout.recommended_min_width >= layout.width);
//! ```

pub mod bidi;
pub mod catalog;
pub mod config;
pub mod error;
pub mod language;
pub mod layout;
pub mod measure;
pub mod mock;
pub mod render;
pub mod report;
pub mod specifiers;
pub mod stats;
pub mod sweep;
pub mod validate;

pub use bidi::{DIRECTIONAL_CONTROLS, has_directional_overrides};
pub use catalog::{CatalogUnit, StringCatalog, load_catalog, parse_catalog};
pub use config::QaConfig;
pub use error::{QaError, QaResult};
pub use language::{LanguageTag, RtlPolicy};
pub use layout::{LayoutSimulation, LayoutSimulator, recommended_min_width};
pub use measure::{FontDescriptor, HeuristicMeasurer, TextMeasurer, TextSize};
pub use mock::{MockMeasureMode, MockMeasurer};
pub use render::{ReportFormat, render_report};
pub use report::{ReportBuilder, ReportRequest};
pub use specifiers::{extract_specifiers, specifiers_match};
pub use stats::{TextAnalysis, analyze_text};
pub use sweep::{DEFAULT_JOBS, SweepIssues, SweepReport, SweepStats, sweep_catalog};
pub use validate::{TranslationValidator, ValidationReport, validate_translation};
