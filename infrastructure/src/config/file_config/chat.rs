//! Chat session configuration from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Deliver replies in submission order instead of completion order
    pub serialize_submissions: bool,
    /// Write the conversation as JSONL to this path
    pub transcript_log: Option<String>,
}
