//! Presentation channel port
//!
//! The boundary between a chat session and whatever renders it (a webview,
//! a terminal, a test recorder). Outbound traffic goes through
//! [`PresentationChannel::send`]; inbound traffic is handed to
//! [`ChatSession::handle_inbound`](crate::ChatSession::handle_inbound).

use buddy_domain::OutboundMessage;
use thiserror::Error;

/// Errors reported by a presentation channel
///
/// These are never surfaced to callers of the session: an unavailable
/// channel makes the session buffer its outbound messages instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Channel unavailable: {0}")]
    Unavailable(String),
}

/// Outbound half of a presentation surface.
pub trait PresentationChannel: Send + Sync {
    /// Deliver one message to the surface.
    fn send(&self, message: &OutboundMessage) -> Result<(), ChannelError>;

    /// Short label for log output.
    fn name(&self) -> &str {
        "channel"
    }
}
