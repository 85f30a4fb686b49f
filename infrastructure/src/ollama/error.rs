//! Error types for the Ollama adapter

use buddy_application::ports::inference_gateway::InferenceError;
use thiserror::Error;

/// Result type alias for Ollama operations
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur when talking to an Ollama server
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Failed to reach Ollama at {url} (is it running?): {reason}")]
    Connection { url: String, reason: String },

    #[error("Ollama returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl OllamaError {
    /// Classify a transport error from reqwest.
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OllamaError::Timeout
        } else if err.is_decode() {
            OllamaError::Parse(err.to_string())
        } else {
            OllamaError::Connection {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

impl From<OllamaError> for InferenceError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::Connection { .. } => InferenceError::Unreachable(err.to_string()),
            OllamaError::Http { status, body } => InferenceError::Status { status, body },
            OllamaError::Parse(reason) => InferenceError::MalformedResponse(reason),
            OllamaError::Timeout => InferenceError::Timeout,
            OllamaError::ClientBuild(_) | OllamaError::InvalidModel(_) => {
                InferenceError::Other(err.to_string())
            }
        }
    }
}
