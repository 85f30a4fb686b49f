//! Prompt templates for each task kind

use crate::inference::task::TaskKind;

/// Templates for generating prompts
///
/// Every function here is pure: the same input always yields the same prompt.
pub struct PromptTemplate;

impl PromptTemplate {
    /// Build the prompt for `task` with `body` as its input.
    ///
    /// [`TaskKind::QueryDocument`] needs a document context as well; with
    /// only a body it is passed through verbatim. Callers that have a
    /// context use [`query_document`](Self::query_document).
    pub fn build(task: TaskKind, body: &str) -> String {
        match task {
            TaskKind::Complete | TaskKind::QueryDocument => body.to_string(),
            TaskKind::Explain => Self::explain(body),
            TaskKind::Debug => Self::debug(body),
            TaskKind::GenerateTests => Self::generate_tests(body),
        }
    }

    /// User prompt for code explanation
    pub fn explain(code: &str) -> String {
        format!("Explain the following code:\n\n{}", code)
    }

    /// User prompt for debugging suggestions
    pub fn debug(code: &str) -> String {
        format!(
            "Debug the following code and provide suggestions:\n\n{}",
            code
        )
    }

    /// User prompt for test generation
    pub fn generate_tests(code: &str) -> String {
        format!("Generate test cases for the following code:\n\n{}", code)
    }

    /// User prompt for answering a question from a document
    pub fn query_document(query: &str, context: &str) -> String {
        format!(
            "Given the following context:\n\n{}\n\nAnswer the following question:\n{}",
            context, query
        )
    }
}
