//! Amalaw Chat Service
//!
//! HTTP service answering immigration questions in the persona of the AMA
//! author, backed by an OpenAI model (the fine-tuned one when configured).
//! Exposes the JSON API the chat UI calls: `POST /api/chat` and
//! `GET /health`.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod prompt;

use amalaw_llm::{ChatClient, OpenAiClient};
use config::ServerConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the chat service HTTP server
///
/// Resolves the API key, builds the chat backend, and starts the axum
/// server.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Amalaw chat service");
    info!("Bind address: {}", config.bind_addr());
    info!("Answer model: {}", config.model_id);
    info!("Classifier model: {}", config.classifier_model);

    let api_key = config.resolve_api_key()?;
    let llm = Arc::new(ChatClient::OpenAi(OpenAiClient::new(api_key)));

    let state = AppState {
        llm,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Chat service listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
