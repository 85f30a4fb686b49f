//! Ollama adapter
//!
//! Implements [`InferenceGateway`](buddy_application::InferenceGateway) over
//! the Ollama HTTP API.

pub mod error;
pub mod gateway;
pub mod protocol;
