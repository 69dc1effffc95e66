//! Response generation with sequential model fallback.
//!
//! The generator walks a fixed, ordered candidate list and fires one
//! chat-completion call per candidate until one answers. Individual hosted
//! models are often rate-limited or temporarily offline, and this linear
//! pass is the relay's only resilience mechanism: no retry of a failed
//! candidate, no backoff, at most N calls for N candidates.
//!
//! First success wins. Later candidates are never attempted, and responses
//! are never merged across models.

use serde::Serialize;

use crate::chat::mood::Mood;
use crate::llm::{ChatMessage, InferenceClient};

/// Output cap for generated replies.
const REPLY_MAX_TOKENS: u32 = 100;

/// Sampling temperature for generated replies. Moderate, for natural
/// phrasing variety.
const REPLY_TEMPERATURE: f64 = 0.7;

/// The terminal result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatOutcome {
    /// Identifier of the candidate that produced the reply.
    pub model_used: String,
    /// The reply text.
    pub reply: String,
}

/// Tone directive interpolated into the system prompt per mood.
fn tone_directive(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "Match their upbeat energy and keep the reply warm and enthusiastic.",
        Mood::Neutral => "Keep the reply friendly and to the point.",
        Mood::Confused => {
            "Explain things simply, one step at a time, and avoid jargon entirely."
        }
        Mood::Frustrated => {
            "Stay calm and patient, acknowledge the trouble, and offer concrete help."
        }
    }
}

/// Build the system prompt for response generation.
///
/// Bookstore-assistant persona plus a tone rule conditioned on the detected
/// mood. Only the closed [`Mood`] type reaches this template.
pub fn build_system_prompt(mood: Mood) -> String {
    format!(
        "You are a friendly human bookstore assistant. Reply naturally. \
         The customer currently sounds {mood}. {}",
        tone_directive(mood)
    )
}

/// Generates replies by trying candidate models in priority order.
#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    client: InferenceClient,
    models: Vec<String>,
}

impl ResponseGenerator {
    /// Create a generator with an ordered candidate list.
    ///
    /// The list is fixed for the lifetime of the generator; tests pass
    /// short deterministic lists.
    pub fn new(client: InferenceClient, models: Vec<String>) -> Self {
        Self { client, models }
    }

    /// The candidate list, in attempt order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generate a reply for one message.
    ///
    /// Walks the candidate list in order, one call each. The first
    /// successful attempt becomes the outcome; each failure is logged with
    /// its reason and iteration advances. `None` means every candidate
    /// failed.
    pub async fn generate(&self, text: &str, mood: Mood) -> Option<ChatOutcome> {
        let messages = [
            ChatMessage::system(build_system_prompt(mood)),
            ChatMessage::user(text),
        ];

        for model in &self.models {
            tracing::info!(%model, "trying model");
            match self
                .client
                .chat_completion(model, &messages, REPLY_MAX_TOKENS, REPLY_TEMPERATURE)
                .await
            {
                Ok(reply) => {
                    tracing::info!(%model, "model responded");
                    return Some(ChatOutcome {
                        model_used: model.clone(),
                        reply,
                    });
                }
                Err(err) => {
                    tracing::warn!(%model, error = %err, "model failed, switching to next");
                }
            }
        }

        tracing::error!(candidates = self.models.len(), "all candidate models failed");
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn reply_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    fn generator(server: &MockServer, models: &[&str]) -> ResponseGenerator {
        ResponseGenerator::new(
            InferenceClient::new(server.base_url(), "tok"),
            models.iter().map(|m| m.to_string()).collect(),
        )
    }

    #[test]
    fn system_prompt_embeds_mood_and_directive() {
        let prompt = build_system_prompt(Mood::Frustrated);
        assert!(prompt.contains("bookstore assistant"));
        assert!(prompt.contains("sounds frustrated"));
        assert!(prompt.contains("acknowledge the trouble"));
    }

    #[tokio::test]
    async fn first_candidate_success_stops_iteration() {
        let server = MockServer::start_async().await;
        let first = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_partial(r#"{"model": "m1"}"#);
                then.status(200)
                    .json_body(reply_body("Yes! We have a few copies up front."));
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_partial(r#"{"model": "m2"}"#);
                then.status(200).json_body(reply_body("should not be asked"));
            })
            .await;

        let outcome = generator(&server, &["m1", "m2"])
            .generate("Hello, do you have Harry Potter in stock?", Mood::Happy)
            .await
            .unwrap();

        assert_eq!(outcome.model_used, "m1");
        assert_eq!(outcome.reply, "Yes! We have a few copies up front.");
        first.assert_hits_async(1).await;
        second.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn falls_through_to_third_candidate_on_rate_limits() {
        let server = MockServer::start_async().await;
        let m1 = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_partial(r#"{"model": "m1"}"#);
                then.status(429).body("rate limited");
            })
            .await;
        let m2 = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_partial(r#"{"model": "m2"}"#);
                then.status(429).body("rate limited");
            })
            .await;
        let m3 = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_partial(r#"{"model": "m3"}"#);
                then.status(200).json_body(reply_body("third time lucky"));
            })
            .await;

        let outcome = generator(&server, &["m1", "m2", "m3"])
            .generate("Hello, do you have Harry Potter in stock?", Mood::Neutral)
            .await
            .unwrap();

        assert_eq!(outcome.model_used, "m3");
        assert_eq!(outcome.reply, "third time lucky");
        m1.assert_hits_async(1).await;
        m2.assert_hits_async(1).await;
        m3.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn malformed_body_counts_as_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_partial(r#"{"model": "m1"}"#);
                then.status(200).json_body(serde_json::json!({"oops": true}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_partial(r#"{"model": "m2"}"#);
                then.status(200).json_body(reply_body("recovered"));
            })
            .await;

        let outcome = generator(&server, &["m1", "m2"])
            .generate("hi", Mood::Neutral)
            .await
            .unwrap();

        assert_eq!(outcome.model_used, "m2");
    }

    #[tokio::test]
    async fn exhaustion_returns_none_after_one_pass() {
        let server = MockServer::start_async().await;
        let all = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(500).body("down");
            })
            .await;

        let outcome = generator(&server, &["m1", "m2"])
            .generate("hi", Mood::Neutral)
            .await;

        assert!(outcome.is_none());
        // one linear pass: no retries of failed candidates
        all.assert_hits_async(2).await;
    }
}
