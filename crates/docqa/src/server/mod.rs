//! HTTP server for the document QA service

pub mod routes;
pub mod state;
pub mod ui;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::net::SocketAddr;
use std::path::Path;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Secrets};
use crate::error::{Error, Result};
use crate::types::ReadinessResponse;
use state::AppState;

/// Document QA HTTP server
pub struct DocQaServer {
    config: AppConfig,
    state: AppState,
}

impl DocQaServer {
    /// Create a new server. Fails before anything is bound if the
    /// configuration or providers cannot be set up.
    pub async fn new(config: AppConfig, secrets: &Secrets) -> Result<Self> {
        config.validate()?;
        let state = AppState::new(config.clone(), secrets).await?;
        Ok(Self { config, state })
    }

    /// Load secrets, then configuration, then build the server.
    ///
    /// Secrets come first so a missing value fails startup before any
    /// provider is created or any port is bound.
    pub async fn from_files(
        config_path: Option<&Path>,
        secrets_path: Option<&Path>,
    ) -> Result<Self> {
        let secrets = Secrets::load(secrets_path)?;
        let config = AppConfig::load(config_path)?;
        Self::new(config, &secrets).await
    }

    /// Server configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        router(self.state.clone())
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting document QA server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Build the full router over `state`
pub fn router(state: AppState) -> Router {
    let server_config = state.config().server.clone();

    let router = Router::new()
        .route("/", get(ui::index))
        .route("/health", get(health_check))
        .route("/ready", get(readiness))
        // API routes with body limit for multipart uploads
        .nest("/api", routes::api_routes(server_config.max_upload_size))
        .with_state(state)
        // Middleware layers (order matters - applied bottom to top)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if server_config.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check: both the document store and the model must respond
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let storage = match state.uploader().store().health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            false
        }
    };
    let llm = match state.qa().provider().health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("LLM health check failed: {}", e);
            false
        }
    };

    let ready = storage && llm;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ReadinessResponse { ready, storage, llm }))
}
