//! Chat domain.
//!
//! - [`entities::ChatMessage`] - an immutable transcript entry
//! - [`protocol::OutboundMessage`] / [`protocol::InboundMessage`] - messages
//!   exchanged with a presentation channel

pub mod entities;
pub mod protocol;
