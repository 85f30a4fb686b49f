//! Inference domain.
//!
//! - [`task::TaskKind`] - what the model is asked to do
//! - [`task::InferenceRequest`] - a fully built request for the endpoint

pub mod task;
