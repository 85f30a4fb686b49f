//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat_session;
pub mod document_registry;
pub mod inference_client;
pub mod ingest_document;
