//! Presentation layer for code-buddy
//!
//! This crate contains CLI definitions, the console channel,
//! progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{Cli, Command};
pub use cli::selection::read_selection;
pub use config::ReplConfig;
pub use output::console::{ConsoleChannel, ConsoleFormatter};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
