//! bookclerk HTTP server binary.
//!
//! Starts an axum HTTP server exposing the chat relay.
//!
//! # Environment Variables
//!
//! - `HF_TOKEN` — bearer credential for the inference API (required)
//! - `HF_BASE_URL` — inference API base URL (default: Hugging Face router)
//! - `PORT` — HTTP port (default: 3000)
//! - `REPLY_MODELS` — comma-separated candidate list override
//! - `MOOD_MODEL` — mood classifier model override
//! - `RUST_LOG` — tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! HF_TOKEN=hf_... cargo run --bin server
//! ```

use bookclerk::server::{app_router, AppState};
use bookclerk::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bookclerk=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    let bind_addr = format!("0.0.0.0:{}", config.port);

    tracing::info!(
        candidates = ?config.reply_models,
        mood_model = %config.mood_model,
        "model configuration loaded"
    );

    let state = AppState::from_config(&config);
    let app = app_router(state);

    tracing::info!("bookclerk server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health — liveness probe");
    tracing::info!("  POST /chat   — chat relay with model fallback");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve when ctrl-c arrives.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
