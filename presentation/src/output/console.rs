//! Console presentation channel

use buddy_application::ports::presentation_channel::{ChannelError, PresentationChannel};
use buddy_domain::OutboundMessage;
use colored::Colorize;
use std::io::{self, Write};

/// Formats chat traffic for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render an outbound message with a role label.
    pub fn format(message: &OutboundMessage) -> String {
        let label = match message {
            OutboundMessage::AssistantMessage { .. } => "buddy>".green().bold(),
            OutboundMessage::ErrorMessage { .. } => "error>".red().bold(),
            OutboundMessage::UserMessage { .. } => "you>".cyan().bold(),
        };
        let body = if message.is_error() {
            message.content().red().to_string()
        } else {
            message.content().to_string()
        };
        format!("{} {}", label, body)
    }

    pub fn header(title: &str) -> String {
        format!("{}\n{}", title.cyan().bold(), "=".repeat(title.len()).cyan())
    }
}

/// [`PresentationChannel`] that prints to stdout.
pub struct ConsoleChannel;

impl PresentationChannel for ConsoleChannel {
    fn send(&self, message: &OutboundMessage) -> Result<(), ChannelError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}\n", ConsoleFormatter::format(message))
            .and_then(|()| out.flush())
            .map_err(|e| ChannelError::Unavailable(e.to_string()))
    }

    fn name(&self) -> &str {
        "console"
    }
}
