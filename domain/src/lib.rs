//! Domain layer for code-buddy
//!
//! This crate contains the entities and value objects of the assistant.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Chat
//!
//! A conversation is an ordered transcript of [`ChatMessage`]s. Messages that
//! cross the presentation boundary use the wire types [`OutboundMessage`] and
//! [`InboundMessage`].
//!
//! ## Inference
//!
//! Every model call is described by an [`InferenceRequest`]: a [`TaskKind`],
//! the prompt body built by [`PromptTemplate`], and the target [`Model`].
//!
//! ## Documents
//!
//! Uploaded files become [`DocumentEntry`] values keyed by file name.

pub mod chat;
pub mod core;
pub mod document;
pub mod inference;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use chat::{
    entities::{ChatMessage, ChatRole},
    protocol::{InboundMessage, OutboundMessage},
};
pub use core::{error::DomainError, model::Model};
pub use document::entities::{DocumentEntry, DocumentFormat};
pub use inference::task::{InferenceRequest, TaskKind};
pub use prompt::PromptTemplate;
