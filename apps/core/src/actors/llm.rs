use crate::actors::messages::{ActorError, AppError, CompletionMessage, CompletionResponse};
use crate::actors::traits::CompletionEngine;
use crate::config::CompletionConfig;
use crate::models::{ChatTurn, Speaker};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Extra time the handle waits on top of the HTTP deadline before giving up on the actor.
const MAILBOX_GRACE: Duration = Duration::from_secs(5);

/// A handle to the completion actor.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running completion actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct CompletionActorHandle {
    sender: mpsc::Sender<CompletionMessage>,
    request_timeout: Duration,
}

impl CompletionActorHandle {
    /// Creates a new completion actor and returns a handle to it.
    ///
    /// This will spawn the `CompletionActorRunner` in a new Tokio task.
    pub fn new(config: CompletionConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let request_timeout = config.timeout;
        let actor = CompletionActorRunner::new(receiver, config);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            request_timeout,
        }
    }
}

#[async_trait]
impl CompletionEngine for CompletionActorHandle {
    async fn complete(&self, conversation: Vec<ChatTurn>) -> Result<CompletionResponse, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = CompletionMessage::Complete {
            conversation,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?;
        timeout(self.request_timeout + MAILBOX_GRACE, recv)
            .await?
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?
    }
}

/// Wire role for a speaker. The engine calls the assistant side "model".
fn wire_role(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "user",
        Speaker::Assistant => "model",
    }
}

/// Request body for a `generateContent` call.
fn build_payload(conversation: &[ChatTurn]) -> serde_json::Value {
    let contents: Vec<serde_json::Value> = conversation
        .iter()
        .map(|turn| {
            json!({
                "role": wire_role(turn.role),
                "parts": [{ "text": turn.content }]
            })
        })
        .collect();

    json!({ "contents": contents })
}

// --- Actor Runner (Internal Logic) ---
struct CompletionActorRunner {
    receiver: mpsc::Receiver<CompletionMessage>,
    client: Arc<CompletionClient>,
}

impl CompletionActorRunner {
    fn new(receiver: mpsc::Receiver<CompletionMessage>, config: CompletionConfig) -> Self {
        Self {
            receiver,
            client: Arc::new(CompletionClient {
                endpoint: config.endpoint(),
                api_key: config.api_key,
                request_timeout: config.timeout,
                http: Client::new(),
            }),
        }
    }

    async fn run(mut self) {
        info!(endpoint = %self.client.endpoint, "Completion actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }

        info!("Completion actor stopped");
    }

    /// Each request runs in its own task so a slow answer never holds up the mailbox.
    fn handle_message(&self, msg: CompletionMessage) {
        match msg {
            CompletionMessage::Complete {
                conversation,
                responder,
            } => {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    let result = client.generate_completion(conversation).await;
                    let _ = responder.send(result);
                });
            }
        }
    }
}

/// Shared HTTP state used by every in-flight request.
struct CompletionClient {
    endpoint: String,
    api_key: String,
    request_timeout: Duration,
    http: Client,
}

impl CompletionClient {
    fn build_request(&self, payload: &serde_json::Value) -> Result<reqwest::RequestBuilder, AppError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| AppError::Config(format!("Invalid API key header: {}", e)))?;
        headers.insert("x-goog-api-key", key);

        Ok(self.http.post(&self.endpoint).headers(headers).json(payload))
    }

    async fn generate_completion(&self, conversation: Vec<ChatTurn>) -> Result<CompletionResponse, AppError> {
        debug!(turns = conversation.len(), "Requesting completion");

        let payload = build_payload(&conversation);
        let request_future = self.build_request(&payload)?.send();

        let res = timeout(self.request_timeout, request_future).await??;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Actor(ActorError::LlmError(format!(
                "Completion request failed with status {}: {}",
                status.as_u16(),
                body
            ))));
        }

        let body = timeout(self.request_timeout, res.text()).await??;

        // A body we cannot read as a completion is an unusable answer, not a failure.
        match serde_json::from_str::<CompletionResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!("Completion body could not be parsed: {}", e);
                Ok(CompletionResponse::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server_url: &str, timeout_ms: u64) -> CompletionConfig {
        CompletionConfig {
            base_url: Url::parse(server_url).unwrap(),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    fn user(text: &str) -> ChatTurn {
        ChatTurn {
            role: Speaker::User,
            content: text.to_string(),
        }
    }

    const ENDPOINT: &str = "/models/test-model:generateContent";

    #[test]
    fn test_payload_maps_roles() {
        let payload = build_payload(&[
            user("hi"),
            ChatTurn {
                role: Speaker::Assistant,
                content: "hello".to_string(),
            },
        ]);

        assert_eq!(
            payload,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "model", "parts": [{"text": "hello"}]}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_complete_success() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = CompletionActorHandle::new(test_config(&mock_server.uri(), 2_000));

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "This is a test response."}], "role": "model"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle.complete(vec![user("Hello")]).await;

        // 3. Assert
        let response = result.unwrap();
        assert_eq!(
            response.first_candidate_text().as_deref(),
            Some("This is a test response.")
        );
    }

    #[tokio::test]
    async fn test_complete_server_error() {
        let mock_server = MockServer::start().await;
        let handle = CompletionActorHandle::new(test_config(&mock_server.uri(), 2_000));

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let result = handle.complete(vec![user("Hello")]).await;

        match result {
            Err(AppError::Actor(ActorError::LlmError(msg))) => {
                assert!(msg.contains("Completion request failed with status 500"));
                assert!(msg.contains("Internal Server Error"));
            }
            other => panic!("Expected LlmError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_no_candidates() {
        let mock_server = MockServer::start().await;
        let handle = CompletionActorHandle::new(test_config(&mock_server.uri(), 2_000));

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&mock_server)
            .await;

        let response = handle.complete(vec![user("Hello")]).await.unwrap();
        assert_eq!(response.first_candidate_text(), None);
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let mock_server = MockServer::start().await;
        let handle = CompletionActorHandle::new(test_config(&mock_server.uri(), 2_000));

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let response = handle.complete(vec![user("Hello")]).await.unwrap();
        assert_eq!(response, CompletionResponse::default());
    }

    #[tokio::test]
    async fn test_complete_timeout() {
        let mock_server = MockServer::start().await;
        let handle = CompletionActorHandle::new(test_config(&mock_server.uri(), 100));

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"candidates": []}))
                    .set_delay(Duration::from_millis(1_000)),
            )
            .mount(&mock_server)
            .await;

        let result = handle.complete(vec![user("Hello")]).await;
        assert!(matches!(result, Err(AppError::Timeout(_))), "got {:?}", result);
    }

    #[tokio::test]
    async fn test_complete_unreachable_server() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let handle = CompletionActorHandle::new(test_config("http://127.0.0.1:9", 2_000));

        let result = handle.complete(vec![user("Hello")]).await;
        assert!(result.is_err());
    }
}
