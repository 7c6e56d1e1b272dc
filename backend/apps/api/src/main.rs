//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::{
    AuthAppState, AuthConfig, ExpirySweeper, PgReferenceSource, ReferenceCaches,
    SessionRegistry, auth_router,
};
use axum::http::{self, HeaderName, Method, header};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = auth_config_from_env()?;

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Reference data must be fully loaded before serving
    let source = Arc::new(PgReferenceSource::new(pool));
    let caches = ReferenceCaches::load(source)
        .await
        .context("initial reference cache load failed")?;

    let sessions = Arc::new(SessionRegistry::new());
    let sweeper = ExpirySweeper::spawn(Arc::clone(&sessions), config.sweep_interval);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let token_header = HeaderName::try_from(config.token_header.as_str())
        .context("AUTH_TOKEN_HEADER is not a valid header name")?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            token_header,
        ]))
        .expose_headers([header::LOCATION]);

    let state = AuthAppState::new(Arc::new(caches), sessions, Arc::new(config));

    // Build router
    let app = auth_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .context("LISTEN_ADDR is not a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Process settings from the environment, defaults for anything unset
fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let mut config = AuthConfig::default();

    if let Ok(name) = env::var("AUTH_TOKEN_HEADER") {
        config.token_header = name.trim().to_ascii_lowercase();
    }

    if let Ok(secs) = env::var("AUTH_SWEEP_INTERVAL_SECS") {
        let secs: u64 = secs
            .trim()
            .parse()
            .context("AUTH_SWEEP_INTERVAL_SECS must be a whole number of seconds")?;
        anyhow::ensure!(secs > 0, "AUTH_SWEEP_INTERVAL_SECS must be positive");
        config.sweep_interval = Duration::from_secs(secs);
    }

    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
