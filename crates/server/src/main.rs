use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filelist_core::{
    load_config, validate_config, FileListClient, IndexClient, StreamCache, StreamResolver,
    SystemClock,
};
use filelist_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default config file, used only when present.
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = match std::env::var("FILELIST_ADDON_CONFIG") {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    };

    // Load configuration
    match &config_path {
        Some(path) => info!("Loading configuration from {:?}", path),
        None => info!("No config file, using defaults and environment"),
    }
    let config = load_config(config_path.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    if config.filelist.credentials().is_none() {
        warn!("FILELIST_USER or FILELIST_PASSKEY is not set, every stream request will return no streams");
    }

    // Fingerprint the effective config
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        version = VERSION,
        config_hash = &config_hash[..16],
        "Configuration loaded successfully"
    );

    // FileList client
    let index: Arc<dyn IndexClient> = Arc::new(
        FileListClient::new(&config.filelist).context("Failed to create FileList client")?,
    );
    info!("Using index backend: {}", index.name());

    // Stream cache, shared by all requests
    let ttl_secs = i64::try_from(config.streams.cache_ttl_secs)
        .context("streams.cache_ttl_secs is out of range")?;
    let cache = Arc::new(StreamCache::new(
        Arc::new(SystemClock),
        chrono::Duration::seconds(ttl_secs),
    ));
    info!("Stream cache TTL: {}s", config.streams.cache_ttl_secs);

    let resolver = Arc::new(StreamResolver::new(&config, index, cache));
    info!(
        "Link strategy: {:?}, max results: {}",
        config.streams.link_strategy, config.streams.max_results
    );

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), resolver));
    info!("Effective config: {:?}", state.sanitized_config());

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);
    info!(
        "Manifest available at {}/manifest.json",
        config.streams.base_url.trim_end_matches('/')
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
