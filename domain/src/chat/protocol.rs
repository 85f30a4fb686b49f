//! Wire messages exchanged with a presentation channel.
//!
//! Both directions use the same JSON shape, a `type` discriminator plus a
//! `content` string:
//!
//! ```
//! use buddy_domain::OutboundMessage;
//!
//! let msg = OutboundMessage::assistant("hi there");
//! let json = serde_json::to_string(&msg).unwrap();
//! assert_eq!(json, r#"{"type":"assistantMessage","content":"hi there"}"#);
//! ```

use super::entities::{ChatMessage, ChatRole};
use serde::{Deserialize, Serialize};

/// Message sent from the session to the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    AssistantMessage { content: String },
    ErrorMessage { content: String },
    UserMessage { content: String },
}

impl OutboundMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        OutboundMessage::AssistantMessage {
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        OutboundMessage::ErrorMessage {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        OutboundMessage::UserMessage {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            OutboundMessage::AssistantMessage { content }
            | OutboundMessage::ErrorMessage { content }
            | OutboundMessage::UserMessage { content } => content,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, OutboundMessage::ErrorMessage { .. })
    }
}

impl From<&ChatMessage> for OutboundMessage {
    fn from(message: &ChatMessage) -> Self {
        let content = message.content().to_string();
        match message.role() {
            ChatRole::User => OutboundMessage::UserMessage { content },
            ChatRole::Assistant => OutboundMessage::AssistantMessage { content },
            ChatRole::Error => OutboundMessage::ErrorMessage { content },
        }
    }
}

/// Message received from the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    UserMessage { content: String },
}

impl InboundMessage {
    pub fn user(content: impl Into<String>) -> Self {
        InboundMessage::UserMessage {
            content: content.into(),
        }
    }
}
