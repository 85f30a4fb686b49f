//! Ollama inference gateway implementation

use crate::ollama::error::{OllamaError, Result};
use crate::ollama::protocol::{GenerateRequest, GenerateResponse, TagsResponse};
use async_trait::async_trait;
use buddy_application::ports::inference_gateway::{InferenceError, InferenceGateway};
use buddy_domain::{InferenceRequest, Model};
use tracing::{debug, info};

/// Default Ollama endpoint. IPv4 loopback rather than `localhost`, which may
/// resolve to `::1` where Ollama is often not listening.
pub const DEFAULT_HOST: &str = "http://127.0.0.1:11434";

/// Environment variable Ollama itself uses for its bind address.
pub const HOST_ENV_VAR: &str = "OLLAMA_HOST";

/// Normalize a user-supplied host: empty means [`DEFAULT_HOST`], a missing
/// scheme gets `http://`, trailing slashes are removed.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    if host.is_empty() {
        return DEFAULT_HOST.to_string();
    }
    let host = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    };
    host.trim_end_matches('/').to_string()
}

/// Inference gateway backed by an Ollama server
pub struct OllamaGateway {
    client: reqwest::Client,
    host: String,
}

impl OllamaGateway {
    /// Create a gateway for `host`. Request deadlines are enforced by
    /// the inference client, not here.
    pub fn new(host: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| OllamaError::ClientBuild(e.to_string()))?;

        let host = normalize_host(host);
        info!("OllamaGateway initialized for {}", host);
        Ok(Self { client, host })
    }

    /// The normalized base URL
    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    /// Run one non-streaming completion.
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String> {
        let url = self.url("/api/generate");
        debug!("POST {} (model {}, {} prompt bytes)", url, model, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest::new(model, prompt))
            .send()
            .await
            .map_err(|e| OllamaError::from_reqwest(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OllamaError::from_reqwest(&url, e))?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| OllamaError::Parse(e.to_string()))?;
        Ok(parsed.response)
    }

    /// Names of the models the server has pulled.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = self.url("/api/tags");
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OllamaError::from_reqwest(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OllamaError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl InferenceGateway for OllamaGateway {
    async fn generate(&self, request: &InferenceRequest) -> std::result::Result<String, InferenceError> {
        Ok(self
            .generate_text(request.model.as_str(), &request.prompt)
            .await?)
    }

    async fn available_models(&self) -> std::result::Result<Vec<Model>, InferenceError> {
        self.list_models()
            .await?
            .into_iter()
            .map(|name| {
                Model::new(&name)
                    .map_err(|_| InferenceError::from(OllamaError::InvalidModel(name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_domain::TaskKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    // ==================== Fake server ====================

    /// Accept one connection, capture the raw request, answer with `status`
    /// and `body`. Returns the base URL and a handle yielding the request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let reply = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn request_body(raw: &str) -> serde_json::Value {
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    // ==================== Host handling ====================

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host(""), DEFAULT_HOST);
        assert_eq!(normalize_host("  "), DEFAULT_HOST);
        assert_eq!(normalize_host("localhost:11434"), "http://localhost:11434");
        assert_eq!(normalize_host("http://gpu-box:11434/"), "http://gpu-box:11434");
        assert_eq!(normalize_host("https://ollama.internal//"), "https://ollama.internal");
    }

    #[test]
    fn test_gateway_keeps_normalized_host() {
        let gateway = OllamaGateway::new("10.0.0.5:11434/").unwrap();
        assert_eq!(gateway.host(), "http://10.0.0.5:11434");
    }

    // ==================== Requests ====================

    #[tokio::test]
    async fn test_generate_posts_non_streaming_request() {
        let (host, server) =
            serve_once("200 OK", r#"{"model":"llama3","response":"hi there","done":true}"#).await;
        let gateway = OllamaGateway::new(&host).unwrap();
        let request = InferenceRequest::new(TaskKind::Complete, "hello", Model::default());

        let answer = gateway.generate(&request).await.unwrap();
        assert_eq!(answer, "hi there");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/generate HTTP/1.1"));
        assert_eq!(
            request_body(&raw),
            serde_json::json!({"model": "llama3", "prompt": "hello", "stream": false})
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let (host, server) =
            serve_once("404 Not Found", r#"{"error":"model 'nope' not found"}"#).await;
        let gateway = OllamaGateway::new(&host).unwrap();
        let request =
            InferenceRequest::new(TaskKind::Complete, "x", Model::new("nope").unwrap());

        let err = gateway.generate(&request).await.unwrap_err();
        server.await.unwrap();

        let InferenceError::Status { status, body } = err else {
            panic!("expected Status, got {err:?}");
        };
        assert_eq!(status, 404);
        assert!(body.contains("not found"));
    }

    #[tokio::test]
    async fn test_missing_response_field_is_malformed() {
        let (host, server) = serve_once("200 OK", r#"{"done":true}"#).await;
        let gateway = OllamaGateway::new(&host).unwrap();
        let request = InferenceRequest::new(TaskKind::Explain, "x", Model::default());

        let err = gateway.generate(&request).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, InferenceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = OllamaGateway::new(&addr.to_string()).unwrap();
        let request = InferenceRequest::new(TaskKind::Complete, "x", Model::default());

        let err = gateway.generate(&request).await.unwrap_err();
        assert!(matches!(err, InferenceError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_available_models_from_tags() {
        let (host, server) = serve_once(
            "200 OK",
            r#"{"models":[{"name":"llama3:latest"},{"name":"codellama:7b"}]}"#,
        )
        .await;
        let gateway = OllamaGateway::new(&host).unwrap();

        let models = gateway.available_models().await.unwrap();

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/tags HTTP/1.1"));
        let names: Vec<_> = models.iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["llama3:latest", "codellama:7b"]);
    }
}
