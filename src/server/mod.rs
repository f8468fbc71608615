//! Inbound HTTP surface.
//!
//! Thin plumbing around the core: routes, header extraction, and the
//! `{statusCode, body}` response envelope the widget clients expect.

mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::{KeyValueStore, ReadThroughCache};
use crate::rest::CoinbaseRestClient;

/// Cache TTL applied to balance lookups unless configured otherwise.
pub const BALANCE_CACHE_TTL: Duration = Duration::from_secs(10);

/// Shared state handed to every handler.
pub struct AppState<S> {
    /// The upstream client; credentials are supplied per request.
    pub client: CoinbaseRestClient,
    /// The read-through cache over the configured store.
    pub cache: Arc<ReadThroughCache<S>>,
    /// TTL for cached balances.
    pub balance_ttl: Duration,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            cache: Arc::clone(&self.cache),
            balance_ttl: self.balance_ttl,
        }
    }
}

/// Build the service router.
pub fn router<S>(state: AppState<S>) -> Router
where
    S: KeyValueStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/coinbase/balance", get(handlers::balance::<S>))
        .route("/coinbase/history", get(handlers::history::<S>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
