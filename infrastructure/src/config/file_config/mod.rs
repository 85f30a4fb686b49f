//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on use.

mod chat;
mod ollama;
mod repl;

pub use chat::FileChatConfig;
pub use ollama::FileOllamaConfig;
pub use repl::FileReplConfig;

use buddy_application::BehaviorConfig;
use buddy_domain::{DomainError, Model};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("ollama.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("ollama.model cannot be empty")]
    EmptyModelName,

    #[error("ollama.host cannot be empty")]
    EmptyHost,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Inference endpoint settings
    pub ollama: FileOllamaConfig,
    /// Chat session settings
    pub chat: FileChatConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.ollama.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.ollama.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.ollama.host.trim().is_empty() {
            return Err(ConfigValidationError::EmptyHost);
        }
        Ok(())
    }

    /// The default model as a domain value
    pub fn model(&self) -> Result<Model, DomainError> {
        Model::new(&self.ollama.model)
    }

    /// Session and client behavior derived from `[ollama]` and `[chat]`
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.ollama.timeout_seconds)
            .serialized(self.chat.serialize_submissions)
    }

    /// Resolved path of the JSONL transcript, if enabled
    pub fn transcript_log_path(&self) -> Option<PathBuf> {
        self.chat.transcript_log.as_deref().map(expand_home)
    }
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[ollama]
host = "http://gpu-box:11434"
model = "codellama:13b"
timeout_seconds = 120

[chat]
serialize_submissions = true
transcript_log = "/tmp/buddy.jsonl"

[repl]
show_progress = false
history_file = "~/.local/share/code-buddy/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ollama.host, "http://gpu-box:11434");
        assert_eq!(config.model().unwrap().as_str(), "codellama:13b");
        assert_eq!(config.ollama.timeout_seconds, Some(120));
        assert!(config.chat.serialize_submissions);
        assert_eq!(
            config.transcript_log_path(),
            Some(PathBuf::from("/tmp/buddy.jsonl"))
        );
        assert!(!config.repl.show_progress);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[ollama]
model = "mistral"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ollama.model, "mistral");
        // Defaults should apply
        assert_eq!(config.ollama.host, "http://127.0.0.1:11434");
        assert!(config.ollama.timeout_seconds.is_none());
        assert!(!config.chat.serialize_submissions);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.model().unwrap(), Model::default());
        assert!(config.transcript_log_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_behavior_conversion() {
        let mut config = FileConfig::default();
        assert!(config.behavior().timeout.is_none());

        config.ollama.timeout_seconds = Some(30);
        config.chat.serialize_submissions = true;
        let behavior = config.behavior();
        assert_eq!(behavior.timeout, Some(Duration::from_secs(30)));
        assert!(behavior.serialize_submissions);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[ollama]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[ollama]
model = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = FileConfig::default();
        config.ollama.host = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyHost));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.jsonl"), home.join("x.jsonl"));
        }
    }

    #[test]
    fn test_history_path_default_under_data_dir() {
        let repl = FileReplConfig::default();
        if let Some(path) = repl.history_path() {
            assert!(path.ends_with("code-buddy/history.txt"));
        }
    }
}
