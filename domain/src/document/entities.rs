//! Document entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extracted text content of an uploaded document (Entity)
///
/// `name` is the unique key; re-processing a file with the same name
/// replaces the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    name: String,
    content: String,
}

impl DocumentEntry {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyDocumentName);
        }
        Ok(Self {
            name,
            content: content.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// Document name derived from a path: its final component.
///
/// Returns `None` for paths without a file name (`/`, `..`).
pub fn document_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// File formats with a known extractor slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Txt,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolve a format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::from_extension(&ext)
    }

    /// Resolve a format from an extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentFormat::Txt),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Txt => ".txt",
            DocumentFormat::Pdf => ".pdf",
            DocumentFormat::Docx => ".docx",
        }
    }

    pub fn all() -> [DocumentFormat; 3] {
        [DocumentFormat::Txt, DocumentFormat::Pdf, DocumentFormat::Docx]
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
