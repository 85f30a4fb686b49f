//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - the model identifier sent to the inference endpoint
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
