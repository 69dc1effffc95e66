//! # bookclerk
//!
//! A small HTTP relay that forwards customer messages to a hosted LLM
//! inference API, trying candidate models in sequence until one responds,
//! with a mood pre-pass that adapts the assistant's tone.
//!
//! Hosted free-tier models are flaky — rate limits, cold starts, outages —
//! so the relay's resilience is a single linear fallback pass over an
//! ordered candidate list. First success wins.

pub mod chat;
pub mod config;
pub mod llm;
pub mod server;

pub use chat::{ChatOutcome, Mood, MoodClassifier, ResponseGenerator};
pub use config::Config;
pub use llm::{ChatMessage, InferenceClient, LlmError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
