//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod conversation_logger;
pub mod document_extractor;
pub mod inference_gateway;
pub mod presentation_channel;
pub mod progress;
