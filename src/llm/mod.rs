//! Outbound inference client.
//!
//! One thin wrapper around the OpenAI-compatible `chat/completions`
//! endpoint. Every call in the relay — the mood pre-pass and each fallback
//! attempt — goes through [`InferenceClient::chat_completion`], which makes
//! exactly one HTTP round-trip and reports failure as a tagged [`LlmError`].
//! Retry policy lives with the callers, not here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One turn in a chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    /// The turn text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    /// Build a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Why a single inference call failed.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The HTTP round-trip itself failed (connect, DNS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("inference API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body parsed but did not carry a message choice.
    #[error("malformed inference response: {0}")]
    MalformedResponse(String),
}

/// Client for the inference API.
///
/// Cheap to clone — the inner `reqwest::Client` is already a handle to a
/// shared connection pool.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl InferenceClient {
    /// Create a client for the given API base URL and bearer token.
    ///
    /// No explicit request timeout is set; a hung upstream call blocks its
    /// request until the transport gives up.
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_token: api_token.into(),
        }
    }

    /// Issue one chat-completion call and extract the reply text.
    ///
    /// Posts `{model, messages, max_tokens, temperature}` and returns
    /// `choices[0].message.content` from a 2xx response. Exactly one
    /// attempt — every failure mode comes back as an [`LlmError`] for the
    /// caller to handle.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f64,
    ) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let json: Value = resp.json().await?;
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                LlmError::MalformedResponse("no message content in first choice".into())
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
