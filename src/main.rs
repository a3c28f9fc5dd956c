use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use weather_cache_proxy::adapters::cache::memory_cache::MemoryCache;
use weather_cache_proxy::adapters::openweather::client::OpenWeatherClient;
use weather_cache_proxy::config::{apply_env, load_config};
use weather_cache_proxy::http::server::create_router;
use weather_cache_proxy::ports::cache::WeatherCache;
use weather_cache_proxy::ports::weather_provider::WeatherProvider;
use weather_cache_proxy::service::WeatherService;

const CONFIG_PATH_VAR: &str = "WEATHER_PROXY_CONFIG";

fn find_config_path() -> PathBuf {
    if let Ok(explicit) = std::env::var(CONFIG_PATH_VAR) {
        return PathBuf::from(explicit);
    }

    // Check common locations for config file
    let candidates = [PathBuf::from("config.yaml"), binary_dir().join("config.yaml")];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration; a missing API key stops startup here
    let config_path = find_config_path();
    let config = load_config(&config_path)?;
    let config = apply_env(config, |name| std::env::var(name).ok())?;

    tracing::debug!(?config, "Configuration loaded");

    let memory_cache = Arc::new(MemoryCache::new(Duration::from_secs(config.cache.ttl_secs)));
    let ttl = memory_cache.ttl();
    let cache: Arc<dyn WeatherCache> = memory_cache;
    let provider: Arc<dyn WeatherProvider> = Arc::new(
        OpenWeatherClient::new(config.upstream).context("failed to build upstream HTTP client")?,
    );
    let service = WeatherService::new(cache, provider);

    let app = create_router(service, &config.server.index_file);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.host))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, ttl_secs = ttl.as_secs(), "Server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Server stopped");
    Ok(())
}
