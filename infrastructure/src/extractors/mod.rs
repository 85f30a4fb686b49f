//! Document extractors
//!
//! One [`DocumentExtractor`] per supported file type. Plain text is read
//! directly; PDF and Word documents are registered but not yet parsed.

mod placeholder;
mod text;

pub use placeholder::{DocxExtractor, PdfExtractor};
pub use text::TextExtractor;

use buddy_application::ports::document_extractor::DocumentExtractor;
use std::sync::Arc;

/// The extractor for every supported format.
pub fn default_extractors() -> Vec<Arc<dyn DocumentExtractor>> {
    vec![
        Arc::new(TextExtractor),
        Arc::new(PdfExtractor),
        Arc::new(DocxExtractor),
    ]
}
