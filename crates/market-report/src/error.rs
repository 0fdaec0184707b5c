//! Error types for report generation

use thiserror::Error;

/// Report generation specific errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid symbol provided to a data source
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// One of the data sources failed while assembling a snapshot
    #[error("Data source {source_name} failed: {reason}")]
    SourceFailed { source_name: String, reason: String },

    /// Export requested before any report was generated
    #[error("No report available, generate a report first")]
    NoReportAvailable,

    /// Template compilation or rendering error
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Filesystem error while exporting
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReportError {
    /// Wrap any error raised by a named source into the aggregate failure
    pub fn source_failed(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceFailed {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<report_utils::EnvError> for ReportError {
    fn from(err: report_utils::EnvError) -> Self {
        ReportError::Config(err.to_string())
    }
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::InvalidSymbol(String::new());
        assert_eq!(err.to_string(), "Invalid symbol: \"\"");

        let err = ReportError::source_failed("quotes", "boom");
        assert_eq!(err.to_string(), "Data source quotes failed: boom");

        assert_eq!(
            ReportError::NoReportAvailable.to_string(),
            "No report available, generate a report first"
        );
    }

    #[test]
    fn test_env_error_conversion() {
        let err: ReportError = report_utils::EnvError {
            name: "MARKET_REPORT_SEED".to_string(),
            value: "x".to_string(),
        }
        .into();

        match err {
            ReportError::Config(msg) => assert!(msg.contains("MARKET_REPORT_SEED")),
            _ => panic!("Expected Config variant"),
        }
    }
}
