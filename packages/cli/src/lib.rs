// ABOUTME: Server bootstrap for the thesis archive
// ABOUTME: Opens the database, wires the API router with HTTP layers, and serves it

use anyhow::Context;
use archive_api::{create_router, AppState, LocalPdfStore};
use archive_security::TokenService;
use archive_storage::db::{connect, DatabaseConfig};
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod accounts;
pub mod config;
pub mod middleware;

pub use config::{Config, ConfigError};

/// Open (and migrate) the database named by the config
pub async fn open_database(config: &Config) -> anyhow::Result<SqlitePool> {
    let db_config = DatabaseConfig::new(&config.database_path)
        .with_max_connections(config.database_max_connections);
    connect(&db_config)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_path.display()))
}

/// Shared state for request handlers
pub async fn build_state(config: &Config, pool: SqlitePool) -> anyhow::Result<AppState> {
    let store = LocalPdfStore::new(&config.upload_dir);
    store
        .ensure_root()
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.upload_dir.display()))?;

    let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_hours);
    Ok(AppState::new(pool, tokens, Arc::new(store)))
}

/// The full application: API routes plus panic, trace, and CORS layers
pub fn build_app(config: &Config, state: AppState) -> anyhow::Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Ok(create_router(state, &config.upload_dir)
        .layer(middleware::create_panic_handler())
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(?config, "Loaded configuration");

    let pool = open_database(&config).await?;
    let state = build_state(&config, pool).await?;
    let app = build_app(&config, state)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
