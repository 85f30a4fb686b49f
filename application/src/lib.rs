//! Application layer for code-buddy
//!
//! This crate contains the chat session, use cases, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    document_extractor::{DocumentExtractor, ExtractionError},
    inference_gateway::{InferenceError, InferenceGateway},
    presentation_channel::{ChannelError, PresentationChannel},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::chat_session::{ChatSession, Outbox};
pub use use_cases::document_registry::DocumentRegistry;
pub use use_cases::ingest_document::DocumentIngestor;
pub use use_cases::inference_client::InferenceClient;
