//! Ingest Document use case
//!
//! Picks the extractor for a file's type, extracts its text, and registers
//! the result under the file's base name. The registry is only touched after
//! extraction succeeds.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::document_extractor::{DocumentExtractor, ExtractionError};
use crate::use_cases::document_registry::DocumentRegistry;
use buddy_domain::document::entities::document_name;
use buddy_domain::{DocumentEntry, DocumentFormat};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Dispatches files to per-format extractors and fills the registry.
pub struct DocumentIngestor {
    extractors: HashMap<DocumentFormat, Arc<dyn DocumentExtractor>>,
    registry: DocumentRegistry,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl DocumentIngestor {
    /// Create an ingestor with no extractors registered.
    pub fn new(registry: DocumentRegistry) -> Self {
        Self {
            extractors: HashMap::new(),
            registry,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Register an extractor for the format it reports. Replaces any
    /// extractor previously registered for that format.
    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractors.insert(extractor.format(), extractor);
        self
    }

    pub fn with_extractors(
        self,
        extractors: impl IntoIterator<Item = Arc<dyn DocumentExtractor>>,
    ) -> Self {
        extractors
            .into_iter()
            .fold(self, |ingestor, extractor| ingestor.with_extractor(extractor))
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    /// Extract and register the document at `path`.
    pub async fn ingest(&self, path: &Path) -> Result<DocumentEntry, ExtractionError> {
        let extractor = self.extractor_for(path)?;
        let name = document_name(path)
            .ok_or_else(|| ExtractionError::failed(path, "Path has no file name"))?;

        let content = match extractor.extract(path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Extraction of {} failed: {}", path.display(), e);
                return Err(e);
            }
        };

        let entry = DocumentEntry::new(name, content)
            .map_err(|e| ExtractionError::failed(path, e.to_string()))?;
        let replaced = self.registry.register_entry(entry.clone());

        info!(
            "Document {} processed ({} bytes{})",
            entry.name(),
            entry.content().len(),
            if replaced { ", replaced" } else { "" }
        );
        self.conversation_logger.log(ConversationEvent::new(
            "document_registered",
            serde_json::json!({
                "name": entry.name(),
                "path": path.display().to_string(),
                "bytes": entry.content().len(),
                "replaced": replaced,
            }),
        ));

        Ok(entry)
    }

    fn extractor_for(&self, path: &Path) -> Result<&Arc<dyn DocumentExtractor>, ExtractionError> {
        let unsupported = || {
            let ext = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_else(|| "(none)".to_string());
            ExtractionError::UnsupportedFormat(ext)
        };

        let format = DocumentFormat::from_path(path).ok_or_else(unsupported)?;
        self.extractors.get(&format).ok_or_else(unsupported)
    }
}
