/// Error types for the localization QA engine
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QaError {
    /// Malformed input arguments (missing values, non-numeric width, bad language tag)
    #[error("Parse error: {0}")]
    Parse(String),
    /// A ratio was requested against an empty source string
    #[error("Division error: {0}")]
    Division(String),
    /// The text measurement capability was unavailable or failed
    #[error("Measurement error: {0}")]
    Measurement(String),
    /// A string catalog could not be read or decoded
    #[error("Catalog error: {0}")]
    Catalog(String),
    /// A result could not be encoded for output
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for QA operations
pub type QaResult<T> = Result<T, QaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            QaError::Parse("width must be numeric".to_string()).to_string(),
            "Parse error: width must be numeric"
        );
        assert_eq!(
            QaError::Division("source is empty".to_string()).to_string(),
            "Division error: source is empty"
        );
        assert_eq!(
            QaError::Measurement("unavailable".to_string()).to_string(),
            "Measurement error: unavailable"
        );
    }
}
