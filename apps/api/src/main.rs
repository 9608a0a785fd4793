mod analysis;
mod config;
mod embedding_client;
mod errors;
mod matching;
mod routes;
mod settings;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{RedisStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Intern Check API v{}", env!("CARGO_PKG_VERSION"));

    // Redis when configured, otherwise state lives for the process lifetime
    let store = match &config.redis_url {
        Some(url) => Store::new(Arc::new(RedisStore::connect(url).await?)),
        None => {
            info!("REDIS_URL not set; using in-memory store");
            Store::in_memory()
        }
    };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.embedding_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    if config.hf_api_key.is_some() {
        info!(
            "Semantic matching enabled (model: {})",
            embedding_client::MODEL
        );
    } else {
        info!("HF_API_KEY not set; resume matching uses keyword overlap unless a key is stored");
    }

    let state = AppState {
        store,
        http,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
