//! One-shot smoke test for the chat pipeline.
//!
//! Runs a single message through the mood pre-pass and the fallback loop
//! without the HTTP shell, then prints which model answered. Handy for
//! checking the token and the candidate list before deploying.
//!
//! ```bash
//! HF_TOKEN=hf_... cargo run --bin ask -- "Do you carry poetry collections?"
//! ```

use bookclerk::server::AppState;
use bookclerk::Config;

const DEFAULT_MESSAGE: &str = "Hello, do you have Harry Potter in stock?";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let message = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

    let config = Config::from_env()?;
    let state = AppState::from_config(&config);

    let mood = state.classifier.classify(&message).await;
    println!("Detected mood: {mood}");

    match state.generator.generate(&message, mood).await {
        Some(outcome) => {
            println!("Model: {}", outcome.model_used);
            println!("--------------------------------------------------");
            println!("{}", outcome.reply);
            Ok(())
        }
        None => {
            anyhow::bail!("all models failed — check your token or internet connection")
        }
    }
}
