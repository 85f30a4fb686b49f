//! Prompt domain
//!
//! Templates that turn a task and its input into the text sent to the model.

mod template;

pub use template::PromptTemplate;
