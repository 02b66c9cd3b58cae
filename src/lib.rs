//! Gatehouse - a login/signup frontend for a separate auth service
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  form POST   ┌───────────────┐  JSON POST   ┌──────────────┐
//! │ browser  │ ───────────▶ │   Gatehouse   │ ───────────▶ │ backend auth │
//! │          │ ◀─────────── │ (this crate)  │ ◀─────────── │   service    │
//! └──────────┘ page/cookie  └───────────────┘    JSON      └──────────────┘
//! ```
//!
//! The gateway holds no session state of its own. The `session_id` cookie is
//! issued and invalidated by the backend; the gateway only stores it in the
//! browser and forwards it back for verification.
//!
//! # Modules
//!
//! - `api`: home page and metrics endpoint
//! - `auth`: login/signup/logout handlers, validation, session cookie
//! - `backend`: HTTP client for the backend auth service
//! - `views`: HTML pages
//! - `config`: Configuration management
//! - `error`: Error types

pub mod api;
pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod metrics;
pub mod views;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// Immutable after startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Client for the backend auth service
    pub backend: Arc<backend::BackendClient>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Errors
    /// Returns error if the backend client cannot be built
    pub fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        let backend = backend::BackendClient::new(&config.backend)?;
        tracing::info!(
            backend = %config.backend.url,
            timeout_ms = config.backend.timeout_ms,
            "Backend client initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            backend: Arc::new(backend),
        })
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::trace::TraceLayer;

    metrics::init_metrics();

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(api::home_router())
        .merge(auth::auth_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(api::metrics_router())
}

async fn health_check() -> &'static str {
    "OK"
}
