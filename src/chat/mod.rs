//! The chat pipeline: mood pre-pass, then response generation.
//!
//! Per inbound message:
//! 1. Classify the customer's emotional tone (one cheap model call,
//!    fail-safe to neutral)
//! 2. Build a mood-conditioned system prompt
//! 3. Walk the candidate model list until one responds

pub mod mood;
pub mod reply;

pub use mood::{Mood, MoodClassifier};
pub use reply::{ChatOutcome, ResponseGenerator};
