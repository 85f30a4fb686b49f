//! Plain text extraction

use async_trait::async_trait;
use buddy_application::ports::document_extractor::{DocumentExtractor, ExtractionError};
use buddy_domain::DocumentFormat;
use std::path::Path;
use tracing::debug;

/// Reads `.txt` files as UTF-8.
pub struct TextExtractor;

#[async_trait]
impl DocumentExtractor for TextExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Txt
    }

    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ExtractionError::failed(path, format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }
}
