//! Inference Gateway port
//!
//! Defines the interface for communicating with the text-generation endpoint.

use async_trait::async_trait;
use buddy_domain::{InferenceRequest, Model};
use thiserror::Error;

/// Errors that can occur during inference gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("Inference endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("Inference endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),

    #[error("Inference request timed out")]
    Timeout,

    #[error("Invalid inference request: {0}")]
    InvalidRequest(String),

    #[error("Inference failed: {0}")]
    Other(String),
}

/// Gateway to the text-generation endpoint
///
/// This port defines how the application layer talks to the model server.
/// Implementations (adapters) live in the infrastructure layer. Each call is
/// independent: the endpoint keeps no state between requests.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Send a single non-streaming generation request and return the
    /// completed text.
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError>;

    /// Models the endpoint can serve.
    async fn available_models(&self) -> Result<Vec<Model>, InferenceError>;
}
