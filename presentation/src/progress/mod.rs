//! Progress display while the model is working

pub mod reporter;
