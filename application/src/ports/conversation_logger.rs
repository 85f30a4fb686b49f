//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording transcript events
//! (user messages, assistant replies, errors, document uploads) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the conversation
//! itself in a machine-readable format (JSONL). The log is write-only; a
//! session never reads it back.

use serde_json::Value;

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields. The writer adds the timestamp.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "user_message", "assistant_message").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; writer failures are swallowed.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
