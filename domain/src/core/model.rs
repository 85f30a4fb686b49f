//! Model value object representing an inference model identifier

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama3";

/// A model identifier understood by the inference endpoint (Value Object)
///
/// Ollama addresses models by free-form tags (`llama3`, `mistral:7b`,
/// `codellama:13b-instruct`), so this is a validated string rather than
/// a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

impl Model {
    /// Create a model identifier, rejecting empty or whitespace-only names.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyModelName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Model {
    /// Returns the default model (llama3)
    fn default() -> Self {
        Self(DEFAULT_MODEL.to_string())
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::new(s)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
