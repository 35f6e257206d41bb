//! Kisan Setu Weather Advisory - Backend Server

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kisan_setu_backend::{
    config::Config,
    create_app,
    services::{CacheStore, DisabledCacheStore, PgCacheStore, WeatherService},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "kisan_server=debug,kisan_setu_backend=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Kisan Setu Weather Server");
    tracing::info!("Environment: {}", config.environment);

    let cache = build_cache_store(&config).await;
    let weather = WeatherService::new(&config.weather, cache)?;

    // Create application state
    let state = AppState {
        weather: Arc::new(weather),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let ip: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((ip, config.server.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check: http://{}/api/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the cache store; any failure here leaves caching disabled
async fn build_cache_store(config: &Config) -> Arc<dyn CacheStore> {
    let Some(url) = config.cache.url.as_deref() else {
        tracing::info!("No cache database configured; records will not be cached");
        return Arc::new(DisabledCacheStore);
    };

    let store = match PgCacheStore::connect_lazy(&config.cache, url) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("Invalid cache database URL, caching disabled: {}", e);
            return Arc::new(DisabledCacheStore);
        }
    };

    tracing::info!("Running cache migrations...");
    match store.migrate().await {
        Ok(()) => tracing::info!("Cache database ready"),
        Err(e) => tracing::warn!("Cache database not available, continuing without it: {}", e),
    }

    Arc::new(store)
}
