//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Model name cannot be empty")]
    EmptyModelName,

    #[error("Document name cannot be empty")]
    EmptyDocumentName,

    #[error("Task '{0}' cannot be submitted as a code task")]
    NotACodeTask(String),
}
