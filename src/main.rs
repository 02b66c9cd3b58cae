//! Gatehouse binary entry point

use gatehouse::{AppState, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point
///
/// # Setup
/// 1. Load `.env` if present
/// 2. Initialize tracing/logging
/// 3. Load configuration (fails without `BACKEND_URL`)
/// 4. Build Axum router
/// 5. Start HTTP server
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load .env
    dotenvy::dotenv().ok();

    // 2. Initialize tracing/logging
    let log_format =
        std::env::var("GATEHOUSE__LOGGING__FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "gatehouse=info,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "gatehouse=info,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!("Starting Gatehouse...");

    // 3. Load configuration
    let config = config::AppConfig::load()?;
    tracing::info!(
        backend = %config.backend.url,
        secure_cookies = config.cookie.secure,
        "Configuration loaded"
    );

    // 4. Build Axum router
    let addr = config.server.bind_addr();
    let state = AppState::new(config)?;
    let app = gatehouse::build_router(state);

    // 5. Start HTTP server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
