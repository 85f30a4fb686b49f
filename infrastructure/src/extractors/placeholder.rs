//! Extractors for formats that are accepted but not parsed yet.
//!
//! They exist so that `.pdf` and `.docx` uploads report a clear failure
//! instead of "unsupported file type".

use async_trait::async_trait;
use buddy_application::ports::document_extractor::{DocumentExtractor, ExtractionError};
use buddy_domain::DocumentFormat;
use std::path::Path;

pub struct PdfExtractor;

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        Err(ExtractionError::failed(path, "PDF extraction not implemented"))
    }
}

pub struct DocxExtractor;

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        Err(ExtractionError::failed(path, "DOCX extraction not implemented"))
    }
}
