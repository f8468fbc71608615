//! Request handlers for the balance and history endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::auth::Credentials;
use crate::cache::KeyValueStore;
use crate::server::AppState;

/// Body wrapper every response uses, mirroring the HTTP status.
#[derive(Debug, Serialize)]
struct ResponseEnvelope<T> {
    #[serde(rename = "statusCode")]
    status_code: u16,
    body: T,
}

fn envelope<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        Json(ResponseEnvelope {
            status_code: status.as_u16(),
            body,
        }),
    )
        .into_response()
}

fn forbidden() -> Response {
    envelope(
        StatusCode::FORBIDDEN,
        "missing CB-ACCESS-KEY or CB-ACCESS-SECRET header",
    )
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Build per-request credentials from the caller's headers.
///
/// Key and secret are required; locale and display currency fall back to
/// the client defaults.
fn credentials_from_headers(headers: &HeaderMap) -> Option<Credentials> {
    let api_key = header_value(headers, "CB-ACCESS-KEY")?;
    let api_secret = header_value(headers, "CB-ACCESS-SECRET")?;
    let mut credentials = Credentials::new(api_key, api_secret);
    if let Some(locale) = header_value(headers, header::ACCEPT_LANGUAGE.as_str()) {
        credentials = credentials.with_locale(locale);
    }
    if let Some(currency) = header_value(headers, "CB-CURRENCY") {
        credentials = credentials.with_currency(currency);
    }
    Some(credentials)
}

/// `GET /coinbase/balance` - the caller's aggregated balance, cached.
pub(crate) async fn balance<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Response {
    let Some(credentials) = credentials_from_headers(&headers) else {
        return forbidden();
    };

    let cache_key = format!("balance:{}", credentials.api_key);
    let history_key = format!("history:{}", credentials.api_key);
    let result: Result<Decimal, _> = state
        .cache
        .get_or_set(&cache_key, Some(state.balance_ttl), Some(history_key.as_str()), || async {
            state.client.get_current_balance(&credentials).await
        })
        .await;

    match result {
        Ok(balance) => envelope(StatusCode::OK, balance),
        Err(error) => {
            tracing::error!(%error, "balance lookup failed");
            envelope(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

/// `GET /coinbase/history` - every balance snapshot recorded for the caller.
pub(crate) async fn history<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Response {
    let Some(credentials) = credentials_from_headers(&headers) else {
        return forbidden();
    };

    let history_key = format!("history:{}", credentials.api_key);
    match state.cache.get_history::<serde_json::Value>(&history_key).await {
        Ok(history) => envelope(StatusCode::OK, history),
        Err(error) => {
            tracing::error!(%error, "history lookup failed");
            envelope(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}
