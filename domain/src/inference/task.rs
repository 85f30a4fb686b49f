//! Task kinds and inference requests

use crate::core::model::Model;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};

/// The kind of work requested from the model (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    /// Free-form completion; the body is sent verbatim
    Complete,
    /// Explain a code selection
    Explain,
    /// Debug a code selection and suggest fixes
    Debug,
    /// Generate test cases for a code selection
    GenerateTests,
    /// Answer a question about an uploaded document
    QueryDocument,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Complete => "complete",
            TaskKind::Explain => "explain",
            TaskKind::Debug => "debug",
            TaskKind::GenerateTests => "generateTests",
            TaskKind::QueryDocument => "queryDocument",
        }
    }

    /// Whether this task operates on a code selection.
    pub fn is_code_task(&self) -> bool {
        matches!(
            self,
            TaskKind::Explain | TaskKind::Debug | TaskKind::GenerateTests
        )
    }

    /// Heading placed in front of a successful result.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            TaskKind::Explain => Some("Code Explanation:\n\n"),
            TaskKind::Debug => Some("Debugging Information:\n\n"),
            TaskKind::GenerateTests => Some("Generated Test Cases:\n\n"),
            TaskKind::Complete | TaskKind::QueryDocument => None,
        }
    }

    /// Prefix placed in front of a failure cause.
    pub fn error_prefix(&self) -> &'static str {
        match self {
            TaskKind::Complete => "Error processing message: ",
            TaskKind::Explain => "Error explaining code: ",
            TaskKind::Debug => "Error debugging code: ",
            TaskKind::GenerateTests => "Error generating test cases: ",
            TaskKind::QueryDocument => "Error querying document: ",
        }
    }

    /// Apply [`banner`](Self::banner) to a model response.
    pub fn decorate(&self, response: &str) -> String {
        match self.banner() {
            Some(banner) => format!("{banner}{response}"),
            None => response.to_string(),
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent to the inference endpoint.
///
/// Built deterministically from a task and its input; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub task: TaskKind,
    pub prompt: String,
    pub model: Model,
}

impl InferenceRequest {
    /// Build a request for any task except [`TaskKind::QueryDocument`],
    /// which needs a context (see [`for_document`](Self::for_document)).
    pub fn new(task: TaskKind, body: &str, model: Model) -> Self {
        Self {
            task,
            prompt: PromptTemplate::build(task, body),
            model,
        }
    }

    /// Build a document question request.
    pub fn for_document(query: &str, document: &str, model: Model) -> Self {
        Self {
            task: TaskKind::QueryDocument,
            prompt: PromptTemplate::query_document(query, document),
            model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banners() {
        assert_eq!(TaskKind::Explain.decorate("x"), "Code Explanation:\n\nx");
        assert_eq!(TaskKind::Debug.decorate("x"), "Debugging Information:\n\nx");
        assert_eq!(
            TaskKind::GenerateTests.decorate("x"),
            "Generated Test Cases:\n\nx"
        );
        assert_eq!(TaskKind::Complete.decorate("x"), "x");
    }

    #[test]
    fn test_code_tasks() {
        assert!(TaskKind::Explain.is_code_task());
        assert!(TaskKind::GenerateTests.is_code_task());
        assert!(!TaskKind::Complete.is_code_task());
        assert!(!TaskKind::QueryDocument.is_code_task());
    }

    #[test]
    fn test_request_is_deterministic() {
        let a = InferenceRequest::new(TaskKind::Debug, "let x = 1;", Model::default());
        let b = InferenceRequest::new(TaskKind::Debug, "let x = 1;", Model::default());
        assert_eq!(a, b);
        assert_eq!(
            a.prompt,
            "Debug the following code and provide suggestions:\n\nlet x = 1;"
        );
    }

    #[test]
    fn test_document_request() {
        let req = InferenceRequest::for_document("Who?", "Alice wrote it.", Model::default());
        assert_eq!(req.task, TaskKind::QueryDocument);
        assert!(req.prompt.contains("Alice wrote it."));
        assert!(req.prompt.ends_with("Who?"));
    }
}
