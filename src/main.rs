use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use coinbase_balance_service::cache::{ReadThroughCache, RedisStore};
use coinbase_balance_service::config::ServiceConfig;
use coinbase_balance_service::rest::CoinbaseRestClient;
use coinbase_balance_service::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug for per-request cache traces.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    fmt().with_env_filter(env_filter).with_target(false).init();

    let config = ServiceConfig::from_env()?;

    let store = RedisStore::connect(&config.redis_url)
        .await
        .with_context(|| format!("connecting to {}", config.redis_url))?;
    let state = AppState {
        client: CoinbaseRestClient::new(),
        cache: Arc::new(ReadThroughCache::new(store)),
        balance_ttl: config.balance_ttl,
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
