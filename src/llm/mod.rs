//! Text-generation backend abstraction.
//!
//! This trait allows swapping implementations (hosted chat API vs mock).
//! The engine only ever needs one capability: send a structured request,
//! get back one machine-parseable JSON object.

pub mod openai;

pub use openai::OpenAiChat;

use crate::error::{LernfunkError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One request/response round trip to the generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// System instruction sent with every call.
    pub system: String,
    /// User prompt for this call.
    pub user: String,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Trait for structured text generation.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one request and return the parsed JSON object from the reply.
    async fn complete(&self, request: &ChatRequest) -> Result<Value>;
}

/// Extract a required string field from a backend response.
///
/// A missing or non-string field is a hard failure for the story.
pub fn require_str(value: &Value, field: &str) -> Result<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LernfunkError::MissingField {
            field: field.to_string(),
        })
}

/// Extract an optional string field from a backend response.
pub fn optional_str(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Mock backend for testing.
///
/// Returns scripted responses in call order and records every request so
/// tests can assert the exact call sequence and prompt contents.
#[derive(Debug, Default)]
pub struct MockChatBackend {
    responses: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scripted response.
    pub fn with_response(self, response: Value) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<Value> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .ok_or_else(|| LernfunkError::Generation {
                message: "mock backend has no scripted response left".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_returns_responses_in_order() {
        let backend = MockChatBackend::new()
            .with_response(json!({"n": 1}))
            .with_response(json!({"n": 2}));

        let request = ChatRequest {
            system: "sys".to_string(),
            user: "first".to_string(),
            temperature: 0.3,
        };
        assert_eq!(backend.complete(&request).await.unwrap(), json!({"n": 1}));
        assert_eq!(backend.complete(&request).await.unwrap(), json!({"n": 2}));
    }

    #[tokio::test]
    async fn test_mock_errors_when_exhausted() {
        let backend = MockChatBackend::new();
        let request = ChatRequest {
            system: "sys".to_string(),
            user: "prompt".to_string(),
            temperature: 0.3,
        };
        let result = backend.complete(&request).await;
        assert!(matches!(result, Err(LernfunkError::Generation { .. })));
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let backend = MockChatBackend::new().with_response(json!({}));
        let request = ChatRequest {
            system: "sys".to_string(),
            user: "the prompt".to_string(),
            temperature: 0.7,
        };
        backend.complete(&request).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user, "the prompt");
        assert_eq!(requests[0].temperature, 0.7);
    }

    #[test]
    fn test_require_str_present() {
        let value = json!({"text_de": "Hallo"});
        assert_eq!(require_str(&value, "text_de").unwrap(), "Hallo");
    }

    #[test]
    fn test_require_str_missing_is_error() {
        let value = json!({"other": "x"});
        let result = require_str(&value, "text_de");
        match result {
            Err(LernfunkError::MissingField { field }) => assert_eq!(field, "text_de"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_require_str_non_string_is_error() {
        let value = json!({"text_de": 42});
        assert!(require_str(&value, "text_de").is_err());
    }

    #[test]
    fn test_optional_str() {
        let value = json!({"headline_de": "Titel"});
        assert_eq!(optional_str(&value, "headline_de").as_deref(), Some("Titel"));
        assert_eq!(optional_str(&value, "missing"), None);
    }

    #[test]
    fn test_backend_trait_is_object_safe() {
        let _backend: Box<dyn ChatBackend> = Box::new(MockChatBackend::new());
    }
}
