//! Axum route handlers for the bookclerk HTTP server.
//!
//! # Routes
//!
//! - `GET  /health` — plain-text liveness probe
//! - `POST /chat`   — run one message through the mood + fallback pipeline
//!
//! The shell owns the fixed error bodies from the wire contract:
//! 400 `{"error": "No message provided"}`, 500 `{"error": "AI failed to
//! respond"}` on candidate exhaustion, and 500 `{"error": "Server error"}`
//! for anything that panics past the handlers.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::chat::{MoodClassifier, ResponseGenerator};
use crate::config::Config;
use crate::llm::InferenceClient;

/// Shared application state for the HTTP server.
///
/// Both components are immutable after startup; concurrent requests share
/// nothing but the underlying HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Mood pre-pass classifier.
    pub classifier: Arc<MoodClassifier>,
    /// Fallback response generator.
    pub generator: Arc<ResponseGenerator>,
}

impl AppState {
    /// Wire up the pipeline components from startup configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = InferenceClient::new(config.base_url.clone(), config.api_token.clone());
        Self {
            classifier: Arc::new(MoodClassifier::new(
                client.clone(),
                config.mood_model.clone(),
            )),
            generator: Arc::new(ResponseGenerator::new(client, config.reply_models.clone())),
        }
    }
}

/// Incoming chat request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's message text. Optional so a missing field maps to the
    /// contract's 400 body rather than a deserialization rejection.
    pub message: Option<String>,
}

/// Successful chat response.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// The assistant's reply text.
    pub reply: String,
    /// Identifier of the model that produced it.
    #[serde(rename = "modelUsed")]
    pub model_used: String,
}

/// Build the axum router with all routes and layers.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler() -> &'static str {
    "Server is running ✅"
}

/// POST /chat — classify mood, then generate a reply with model fallback.
///
/// The pipeline is strictly sequential per request: one mood call, then at
/// most one call per candidate model. Missing or empty `message` never
/// reaches the pipeline.
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    let message = match request.message {
        Some(m) if !m.is_empty() => m,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "No message provided"})),
            ))
        }
    };

    let mood = state.classifier.classify(&message).await;

    match state.generator.generate(&message, mood).await {
        Some(outcome) => Ok(Json(ChatResponse {
            reply: outcome.reply,
            model_used: outcome.model_used,
        })),
        None => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "AI failed to respond"})),
        )),
    }
}

/// Map a handler panic to the contract's generic 500 body.
///
/// The original fault goes to the log, never to the caller.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Server error"})),
    )
        .into_response()
}

// ============================================================================
// Tests
// ============================================================================
