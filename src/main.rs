//! Mixtape server binary.
//!
//! Loads configuration from the environment, wires the selected session
//! store and music catalog, and serves the session API.

use std::sync::Arc;

use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use mixtape::adapters::http::{session_router, SessionAppState};
use mixtape::adapters::{
    run_migrations, FileSessionStore, HttpCatalogConfig, HttpMusicCatalog, InMemoryMusicCatalog,
    InMemorySessionStore, PostgresSessionStore,
};
use mixtape::config::{AppConfig, ConfigError, StoreBackend, ValidationError};
use mixtape::ports::{CatalogError, MusicCatalog, SessionStore, StoreError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        store = ?config.store.backend,
        remote_catalog = config.catalog.is_remote(),
        "Starting mixtape"
    );

    let store = build_store(&config).await?;
    let catalog = build_catalog(&config)?;

    let app = session_router()
        .with_state(SessionAppState::new(store, catalog))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, StartupError> {
    let store: Arc<dyn SessionStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(InMemorySessionStore::new()),
        StoreBackend::File => {
            info!(data_dir = %config.store.data_dir, "Using file session store");
            Arc::new(FileSessionStore::new(&config.store.data_dir))
        }
        StoreBackend::Postgres => {
            let url = config
                .store
                .database_url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("STORE__DATABASE_URL"))?;
            let pool = PgPoolOptions::new()
                .min_connections(config.store.min_connections)
                .max_connections(config.store.max_connections)
                .acquire_timeout(config.store.acquire_timeout())
                .connect(url)
                .await?;
            if config.store.run_migrations {
                run_migrations(&pool).await?;
                info!("Database migrations applied");
            }
            Arc::new(PostgresSessionStore::new(pool))
        }
    };
    Ok(store)
}

fn build_catalog(config: &AppConfig) -> Result<Arc<dyn MusicCatalog>, StartupError> {
    let catalog = &config.catalog;
    match (catalog.base_url.as_deref(), catalog.access_token()) {
        (Some(base_url), Some(token)) if catalog.is_remote() => {
            let http_config =
                HttpCatalogConfig::new(base_url, token).with_timeout(catalog.timeout());
            Ok(Arc::new(HttpMusicCatalog::new(http_config)?))
        }
        _ => {
            info!("No remote catalog configured, using in-memory catalog");
            Ok(Arc::new(InMemoryMusicCatalog::new()))
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() && !config.is_production() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
