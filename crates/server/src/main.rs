// crates/server/src/main.rs
//! Tabitha server binary.
//!
//! Reads configuration from the environment, wires up the Anthropic
//! collaborator and category table, and serves the API on localhost.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tabitha_core::{AnthropicProvider, CategoryTable, LlmProvider};
use tabitha_server::{create_app, AppState, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;

    eprintln!("\n\u{1f431} tabitha v{}\n", env!("CARGO_PKG_VERSION"));

    let categories = CategoryTable::load(config.categories_path.as_deref())?;
    tracing::info!(domains = categories.len(), "category table loaded");

    let api_key = config.api_key.clone().unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; parse and recommendation requests will fail");
    }
    let provider = AnthropicProvider::new(api_key, config.model.clone())
        .with_timeout(config.llm_timeout_secs);
    tracing::info!(
        provider = provider.name(),
        model = provider.model(),
        timeout_secs = config.llm_timeout_secs,
        "collaborator configured"
    );

    let state = AppState::new(Arc::new(provider), categories, config.filter);
    let app = create_app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("  \u{2192} http://localhost:{}\n", config.port);
    tracing::info!(port = config.port, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
