//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface over a
//! [`ChatSession`](buddy_application::ChatSession).

mod repl;

pub use repl::{ChatRepl, ReplCommand};
