//! Speech synthesis backend abstraction.
//!
//! This trait allows swapping implementations (hosted TTS vs mock). The
//! hosted implementation streams the returned audio bytes straight to disk.

use crate::defaults;
use crate::error::{LernfunkError, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Trait for turning one text segment into one raw audio file.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Synthesize `text` with `voice` and write the audio bytes to `output`.
    ///
    /// `text` must respect the backend's character budget; callers chunk
    /// longer texts before synthesis.
    async fn synthesize(&self, voice: &str, text: &str, output: &Path) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

/// Speech backend for OpenAI-compatible `/audio/speech` endpoints.
pub struct OpenAiSpeech {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiSpeech {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(defaults::SYNTHESIS_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Point the backend at a different OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SpeechBackend for OpenAiSpeech {
    async fn synthesize(&self, voice: &str, text: &str, output: &Path) -> Result<()> {
        let url = format!("{}/audio/speech", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SpeechRequest {
                model: &self.model,
                input: text,
                voice,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LernfunkError::Synthesis {
                message: format!("backend returned {status}: {body}"),
            });
        }

        let mut stream = response.bytes_stream();
        let mut file = tokio::fs::File::create(output).await?;
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        Ok(())
    }
}

/// One recorded synthesis request on a [`MockSpeech`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenRequest {
    pub voice: String,
    pub text: String,
}

/// Mock speech backend for testing.
#[derive(Debug)]
pub struct MockSpeech {
    payload: Vec<u8>,
    fail_when_contains: Option<String>,
    requests: Mutex<Vec<SpokenRequest>>,
}

impl Default for MockSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSpeech {
    /// Create a mock that writes a small fixed payload for every request.
    pub fn new() -> Self {
        Self {
            payload: b"mock-audio".to_vec(),
            fail_when_contains: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Configure the bytes written for each successful request.
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Fail any request whose text contains `needle`.
    pub fn with_failure_when(mut self, needle: impl Into<String>) -> Self {
        self.fail_when_contains = Some(needle.into());
        self
    }

    /// Requests recorded so far, in order.
    pub fn requests(&self) -> Vec<SpokenRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl SpeechBackend for MockSpeech {
    async fn synthesize(&self, voice: &str, text: &str, output: &Path) -> Result<()> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SpokenRequest {
                voice: voice.to_string(),
                text: text.to_string(),
            });

        if let Some(needle) = &self.fail_when_contains
            && text.contains(needle.as_str())
        {
            return Err(LernfunkError::Synthesis {
                message: "mock synthesis failure".to_string(),
            });
        }

        tokio::fs::write(output, &self.payload).await?;
        Ok(())
    }
}
