//! Process configuration loaded from the environment.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use crate::server::BALANCE_CACHE_TTL;

/// Runtime settings for the service process.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Redis connection URL for the cache store.
    pub redis_url: String,
    /// TTL applied to cached balance lookups.
    pub balance_ttl: Duration,
}

impl ServiceConfig {
    /// Load configuration from the environment, with `.env` support.
    ///
    /// Reads `PORT` (default 5000), `REDIS_URL` (default local instance),
    /// and `BALANCE_CACHE_TTL_SECS` (default 10).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = env::var("PORT").unwrap_or_else(|_| "5000".into());
        let bind_addr: SocketAddr = format!("0.0.0.0:{port}")
            .parse()
            .with_context(|| format!("invalid PORT value: {port}"))?;

        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());

        let balance_ttl = match env::var("BALANCE_CACHE_TTL_SECS") {
            Ok(raw) => {
                let seconds = raw
                    .parse()
                    .with_context(|| format!("invalid BALANCE_CACHE_TTL_SECS value: {raw}"))?;
                Duration::from_secs(seconds)
            }
            Err(_) => BALANCE_CACHE_TTL,
        };

        Ok(Self {
            bind_addr,
            redis_url,
            balance_ttl,
        })
    }
}
