//! # Palaver Server
//!
//! Main entry point for the Palaver chat backend. Wires configuration,
//! the PostgreSQL pool, the Redis cache, the media store and the WebSocket
//! registry into the conversation service and serves the HTTP API.

use palaver_config::ConfigLoader;
use palaver_core::{PalaverError, PalaverResult};
use palaver_repository::{DatabasePool, PgMessageRepository, PgUserRepository};
use palaver_rest::{create_router, AppState, ConnectionRegistry};
use palaver_service::{BlobMediaStore, CacheStore, ChatServiceImpl, RedisCacheStore};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Palaver server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> PalaverResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get();

    info!("Environment: {}", config.app.environment);

    // Database
    let db_pool = DatabasePool::connect(&config.database).await?;
    db_pool.run_migrations().await?;

    // Cache: a missing Redis URL degrades to reading through to the
    // database on every request.
    let cache: Arc<dyn CacheStore> = if config.redis.is_enabled() {
        let redis_pool = deadpool_redis::Config::from_url(&config.redis.url)
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| PalaverError::Cache(format!("Failed to create Redis pool: {}", e)))?;
        info!("Redis cache enabled at {}", config.redis.url);
        Arc::new(RedisCacheStore::new(Arc::new(redis_pool)))
    } else {
        warn!("Redis URL not configured, running without cache");
        Arc::new(RedisCacheStore::disabled())
    };

    // Media storage
    let media_store = Arc::new(
        BlobMediaStore::new(
            config.media.storage_dir.clone().into(),
            config.media.max_upload_bytes,
            config.media.public_base_url.clone(),
        )
        .await?,
    );

    // Real-time registry doubles as the notifier
    let registry = Arc::new(ConnectionRegistry::new());

    // Conversation service
    let chat_service = Arc::new(ChatServiceImpl::new(
        Arc::new(PgUserRepository::new(db_pool.clone())),
        Arc::new(PgMessageRepository::new(db_pool.clone())),
        cache,
        media_store.clone(),
        registry.clone(),
    ));

    let app_state = AppState::new(
        chat_service,
        media_store,
        registry,
        config.auth.jwt_secret.clone(),
    );

    let router = create_router(app_state, &config.server);

    let addr = config.server.addr();
    info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PalaverError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PalaverError::Internal(format!("HTTP server error: {}", e)))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,palaver=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
