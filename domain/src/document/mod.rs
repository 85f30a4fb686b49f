//! Document domain.
//!
//! - [`entities::DocumentEntry`] - extracted text keyed by document name
//! - [`entities::DocumentFormat`] - file formats an extractor can be registered for

pub mod entities;
