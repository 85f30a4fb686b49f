//! Ollama HTTP API payloads.
//!
//! Only the fields this client reads are declared; Ollama sends more
//! (timings, context tokens) and those are ignored.
//!
//! - `POST /api/generate` with [`GenerateRequest`], answered by [`GenerateResponse`]
//! - `GET /api/tags`, answered by [`TagsResponse`]

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    /// Always `false`: the client waits for the whole completion.
    pub stream: bool,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            stream: false,
        }
    }
}

/// Non-streaming reply from `/api/generate`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

/// Reply from `/api/tags`
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// One locally available model
#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
}
