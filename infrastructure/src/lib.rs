//! Infrastructure layer for code-buddy
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Ollama HTTP gateway, document extractors,
//! the JSONL transcript writer, and configuration file loading.

pub mod config;
pub mod extractors;
pub mod logging;
pub mod ollama;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileOllamaConfig,
    FileReplConfig,
};
pub use extractors::{DocxExtractor, PdfExtractor, TextExtractor, default_extractors};
pub use logging::JsonlConversationLogger;
pub use ollama::{
    error::{OllamaError, Result},
    gateway::{DEFAULT_HOST, OllamaGateway, normalize_host},
};
