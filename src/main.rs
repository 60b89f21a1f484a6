use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod api;
mod balldontlie;
mod config;
mod error;
mod standings;

#[cfg(test)]
mod testing;

use api::AppState;
use balldontlie::{BalldontlieClient, RawStandingsClient, SportsApi};
use config::Config;
use standings::TeamPerformanceResolver;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up BALLDONTLIE_API_KEY and friends from a local .env, if any
    let dotenv = dotenvy::dotenv();

    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env: {}", e),
    }

    let config = Config::parse();
    config.validate()?;

    let api_key = config.credential();
    match &api_key {
        Some(key) => info!("balldontlie API key loaded ({} chars)", key.len()),
        None => warn!("BALLDONTLIE_API_KEY is not set; upstream endpoints will return errors"),
    }

    let sdk: Arc<dyn SportsApi> = Arc::new(BalldontlieClient::new(
        &config.api_url,
        config.http_timeout(),
    )?);
    let raw = Arc::new(RawStandingsClient::new(
        &config.api_url,
        config.http_timeout(),
    )?);

    let state = AppState {
        api_key: api_key.clone(),
        sdk: sdk.clone(),
        resolver: TeamPerformanceResolver::new(api_key, sdk, raw),
    };
    let app = api::router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Listening on http://{} (upstream {})", addr, config.api_url);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
