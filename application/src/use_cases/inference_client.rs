//! Inference client use case
//!
//! Wraps an [`InferenceGateway`] with the task-specific prompt templates and
//! the configured default model.

use crate::config::BehaviorConfig;
use crate::ports::inference_gateway::{InferenceError, InferenceGateway};
use buddy_domain::util::preview;
use buddy_domain::{InferenceRequest, Model, TaskKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Task-aware client for the text-generation endpoint.
///
/// No retries. Without a configured timeout a call waits until the endpoint
/// answers or fails.
#[derive(Clone)]
pub struct InferenceClient {
    gateway: Arc<dyn InferenceGateway>,
    model: Model,
    timeout: Option<Duration>,
}

impl InferenceClient {
    pub fn new(gateway: Arc<dyn InferenceGateway>) -> Self {
        Self {
            gateway,
            model: Model::default(),
            timeout: None,
        }
    }

    /// Set the model used when a call does not name one
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_behavior(self, behavior: &BehaviorConfig) -> Self {
        self.with_timeout(behavior.timeout)
    }

    /// The default model
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Build the prompt for `task` and send it.
    ///
    /// `model` overrides the default model for this call only.
    /// [`TaskKind::QueryDocument`] is rejected: it needs a document context,
    /// see [`query_document`](Self::query_document).
    pub async fn generate(
        &self,
        task: TaskKind,
        body: &str,
        model: Option<&Model>,
    ) -> Result<String, InferenceError> {
        if task == TaskKind::QueryDocument {
            return Err(InferenceError::InvalidRequest(
                "document questions need a context, use query_document".to_string(),
            ));
        }
        let model = model.cloned().unwrap_or_else(|| self.model.clone());
        let request = InferenceRequest::new(task, body, model);
        self.send(&request).await
    }

    /// Send an already-built request.
    pub async fn send(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        debug!(
            "Inference {} with {}: {}",
            request.task,
            request.model,
            preview(&request.prompt, 80)
        );

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.generate(request))
                .await
                .unwrap_or(Err(InferenceError::Timeout)),
            None => self.gateway.generate(request).await,
        };

        if let Err(e) = &result {
            warn!("Inference {} failed: {}", request.task, e);
        }
        result
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        self.generate(TaskKind::Complete, prompt, None).await
    }

    pub async fn explain(&self, code: &str) -> Result<String, InferenceError> {
        self.generate(TaskKind::Explain, code, None).await
    }

    pub async fn debug(&self, code: &str) -> Result<String, InferenceError> {
        self.generate(TaskKind::Debug, code, None).await
    }

    pub async fn generate_tests(&self, code: &str) -> Result<String, InferenceError> {
        self.generate(TaskKind::GenerateTests, code, None).await
    }

    /// Answer `query` using `context` (usually a document's text).
    pub async fn query_document(&self, query: &str, context: &str) -> Result<String, InferenceError> {
        let request = InferenceRequest::for_document(query, context, self.model.clone());
        self.send(&request).await
    }

    pub async fn available_models(&self) -> Result<Vec<Model>, InferenceError> {
        self.gateway.available_models().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Gateway that replays scripted results and records every request.
    pub(crate) struct MockGateway {
        responses: Mutex<VecDeque<Result<String, InferenceError>>>,
        pub(crate) requests: Mutex<Vec<InferenceRequest>>,
    }

    impl MockGateway {
        pub(crate) fn new(responses: Vec<Result<String, InferenceError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        pub(crate) fn prompts(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.prompt.clone())
                .collect()
        }
    }

    #[async_trait]
    impl InferenceGateway for MockGateway {
        async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(InferenceError::Other("No more responses".to_string())))
        }

        async fn available_models(&self) -> Result<Vec<Model>, InferenceError> {
            Ok(vec![Model::default(), Model::new("mistral").unwrap()])
        }
    }

    /// Gateway that never answers.
    struct HangingGateway;

    #[async_trait]
    impl InferenceGateway for HangingGateway {
        async fn generate(&self, _request: &InferenceRequest) -> Result<String, InferenceError> {
            std::future::pending().await
        }

        async fn available_models(&self) -> Result<Vec<Model>, InferenceError> {
            Ok(vec![])
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_explain_uses_template_and_default_model() {
        let gateway = Arc::new(MockGateway::replying("It adds numbers."));
        let client = InferenceClient::new(gateway.clone());

        let answer = client.explain("a + b").await.unwrap();

        assert_eq!(answer, "It adds numbers.");
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests[0].prompt, "Explain the following code:\n\na + b");
        assert_eq!(requests[0].model.as_str(), "llama3");
        assert_eq!(requests[0].task, TaskKind::Explain);
    }

    #[tokio::test]
    async fn test_model_override_applies_to_single_call() {
        let gateway = Arc::new(MockGateway::new(vec![Ok("a".into()), Ok("b".into())]));
        let client = InferenceClient::new(gateway.clone());
        let mistral = Model::new("mistral").unwrap();

        client.generate(TaskKind::Complete, "x", Some(&mistral)).await.unwrap();
        client.complete("y").await.unwrap();

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests[0].model, mistral);
        assert_eq!(requests[1].model, Model::default());
    }

    #[tokio::test]
    async fn test_query_document_prompt() {
        let gateway = Arc::new(MockGateway::replying("42"));
        let client = InferenceClient::new(gateway.clone());

        client.query_document("What is X?", "X is 42.").await.unwrap();

        assert_eq!(
            gateway.prompts(),
            vec!["Given the following context:\n\nX is 42.\n\nAnswer the following question:\nWhat is X?"]
        );
    }

    #[tokio::test]
    async fn test_generate_rejects_query_without_context() {
        let gateway = Arc::new(MockGateway::replying("unused"));
        let client = InferenceClient::new(gateway.clone());

        let err = client
            .generate(TaskKind::QueryDocument, "What is X?", None)
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::InvalidRequest(_)));
        assert!(gateway.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_error_passes_through_without_retry() {
        let gateway = Arc::new(MockGateway::new(vec![
            Err(InferenceError::Unreachable("connection refused".into())),
            Ok("never used".into()),
        ]));
        let client = InferenceClient::new(gateway.clone());

        let err = client.debug("x").await.unwrap_err();

        assert_eq!(err, InferenceError::Unreachable("connection refused".into()));
        assert_eq!(gateway.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_surfaces_as_inference_error() {
        let client = InferenceClient::new(Arc::new(HangingGateway))
            .with_timeout(Some(Duration::from_secs(3)));

        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err, InferenceError::Timeout);
    }

    #[tokio::test]
    async fn test_available_models_delegates() {
        let client = InferenceClient::new(Arc::new(MockGateway::new(vec![])));
        let models = client.available_models().await.unwrap();
        assert_eq!(models.len(), 2);
    }
}
