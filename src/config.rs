//! Process configuration.
//!
//! Everything the relay needs at startup comes from the environment, is
//! resolved once in `main`, and is handed to the component constructors.
//! Nothing in here is a global — tests build a [`Config`] by hand with
//! whatever short model lists they need.
//!
//! # Environment Variables
//!
//! - `HF_TOKEN` — bearer credential for the inference router (required)
//! - `HF_BASE_URL` — inference API base URL (default: Hugging Face router)
//! - `PORT` — HTTP port (default: 3000)
//! - `REPLY_MODELS` — comma-separated candidate list override
//! - `MOOD_MODEL` — mood classifier model override

use anyhow::{bail, Result};

/// Default inference API base URL (OpenAI-compatible router).
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Candidate models for response generation, in priority order.
///
/// These are the hosted free-tier models most likely to be online; the
/// first is the strongest, the later ones are fast backups for when it is
/// rate-limited or down.
pub const DEFAULT_REPLY_MODELS: &[&str] = &[
    "Qwen/Qwen2.5-72B-Instruct",
    "meta-llama/Llama-3.2-3B-Instruct",
    "microsoft/Phi-3.5-mini-instruct",
];

/// Default model for the mood pre-pass. Small and fast — the call emits a
/// single word.
pub const DEFAULT_MOOD_MODEL: &str = "meta-llama/Llama-3.2-3B-Instruct";

/// Startup configuration for the relay.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the inference API.
    pub api_token: String,
    /// Inference API base URL (no trailing slash).
    pub base_url: String,
    /// HTTP port to listen on.
    pub port: u16,
    /// Ordered candidate models for response generation.
    pub reply_models: Vec<String>,
    /// Single model used for mood classification.
    pub mood_model: String,
}

impl Config {
    /// Load from environment variables.
    ///
    /// Fails only when `HF_TOKEN` is missing; everything else has a
    /// default.
    pub fn from_env() -> Result<Self> {
        let api_token = match std::env::var("HF_TOKEN") {
            Ok(token) if !token.is_empty() => token,
            _ => bail!("HF_TOKEN is not set — the inference API requires a bearer credential"),
        };

        let base_url = std::env::var("HF_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT is not a valid port number: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let reply_models = match std::env::var("REPLY_MODELS") {
            Ok(raw) => {
                let models: Vec<String> = raw
                    .split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect();
                if models.is_empty() {
                    bail!("REPLY_MODELS is set but contains no model identifiers");
                }
                models
            }
            Err(_) => DEFAULT_REPLY_MODELS.iter().map(|m| m.to_string()).collect(),
        };

        let mood_model =
            std::env::var("MOOD_MODEL").unwrap_or_else(|_| DEFAULT_MOOD_MODEL.into());

        Ok(Self {
            api_token,
            base_url,
            port,
            reply_models,
            mood_model,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
