//! Document extractor port
//!
//! Extractors turn a file on disk into plain text. Each one is registered
//! for a single [`DocumentFormat`].

use async_trait::async_trait;
use buddy_domain::DocumentFormat;
use std::path::Path;
use thiserror::Error;

/// Errors raised while turning a file into text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No extractor is registered for the file type
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The extractor failed while reading or parsing
    #[error("{reason}")]
    ExtractionFailed { path: String, reason: String },
}

impl ExtractionError {
    pub fn failed(path: &Path, reason: impl Into<String>) -> Self {
        ExtractionError::ExtractionFailed {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, ExtractionError::UnsupportedFormat(_))
    }
}

/// Port for per-format text extraction
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// The format this extractor handles
    fn format(&self) -> DocumentFormat;

    /// Extract the text content of the file at `path`
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_failed_display_is_reason() {
        let err = ExtractionError::failed(&PathBuf::from("a.pdf"), "PDF extraction not implemented");
        assert_eq!(err.to_string(), "PDF extraction not implemented");
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_unsupported_display() {
        let err = ExtractionError::UnsupportedFormat(".csv".to_string());
        assert_eq!(err.to_string(), "Unsupported file type: .csv");
        assert!(err.is_unsupported());
    }
}
