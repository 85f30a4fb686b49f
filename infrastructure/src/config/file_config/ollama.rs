//! Ollama endpoint configuration from TOML (`[ollama]` section)

use crate::ollama::gateway::DEFAULT_HOST;
use buddy_domain::core::model::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// Raw endpoint configuration from TOML
///
/// # Example
///
/// ```toml
/// [ollama]
/// host = "http://127.0.0.1:11434"
/// model = "codellama:13b"
/// timeout_seconds = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Base URL of the Ollama server
    pub host: String,
    /// Model used when a request does not name one
    pub model: String,
    /// Per-request timeout; absent means wait indefinitely
    pub timeout_seconds: Option<u64>,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: None,
        }
    }
}
