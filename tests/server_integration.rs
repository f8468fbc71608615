use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coinbase_balance_service::cache::{MemoryStore, ReadThroughCache};
use coinbase_balance_service::rest::CoinbaseRestClient;
use coinbase_balance_service::server::{AppState, router};

/// Serve the full router on an ephemeral port, backed by the mock upstream
/// and an in-memory store.
async fn spawn_service(upstream: &MockServer) -> SocketAddr {
    let state = AppState {
        client: CoinbaseRestClient::builder()
            .base_url(upstream.uri())
            .build(),
        cache: Arc::new(ReadThroughCache::new(MemoryStore::new())),
        balance_ttl: Duration::from_secs(10),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    addr
}

fn mount_upstream_balance(server: &MockServer) -> (Mock, Mock) {
    let accounts = Mock::given(method("GET")).and(path("/v2/accounts")).respond_with(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "btc-wallet",
                    "currency": "BTC",
                    "balance": { "amount": "2", "currency": "BTC" }
                }
            ]
        })),
    );
    let sell = Mock::given(method("GET"))
        .and(path("/v2/prices/BTC-EUR/sell"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "amount": "100.00", "currency": "EUR" }
        })));
    (accounts, sell)
}

#[tokio::test]
async fn test_missing_secret_is_rejected_without_upstream_call() {
    let upstream = MockServer::start().await;
    let addr = spawn_service(&upstream).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/coinbase/balance"))
        .header("CB-ACCESS-KEY", "user-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 403);

    let received = upstream.received_requests().await.unwrap();
    assert!(received.is_empty(), "core must not be called");
}

#[tokio::test]
async fn test_balance_envelope_roundtrip() {
    let upstream = MockServer::start().await;
    let (accounts, sell) = mount_upstream_balance(&upstream);
    accounts.mount(&upstream).await;
    sell.mount(&upstream).await;
    let addr = spawn_service(&upstream).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/coinbase/balance"))
        .header("CB-ACCESS-KEY", "user-1")
        .header("CB-ACCESS-SECRET", "secret-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["body"], "200.00");
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let upstream = MockServer::start().await;
    let (accounts, sell) = mount_upstream_balance(&upstream);
    accounts.expect(1).mount(&upstream).await;
    sell.expect(1).mount(&upstream).await;
    let addr = spawn_service(&upstream).await;

    let http = reqwest::Client::new();
    for _ in 0..2 {
        let response = http
            .get(format!("http://{addr}/coinbase/balance"))
            .header("CB-ACCESS-KEY", "user-1")
            .header("CB-ACCESS-SECRET", "secret-1")
            .send()
            .await
            .unwrap();
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["body"], "200.00");
    }

    // Mock expectations (exactly one upstream fetch) verify on drop.
}

#[tokio::test]
async fn test_history_records_balance_snapshots() {
    let upstream = MockServer::start().await;
    let (accounts, sell) = mount_upstream_balance(&upstream);
    accounts.mount(&upstream).await;
    sell.mount(&upstream).await;
    let addr = spawn_service(&upstream).await;

    let http = reqwest::Client::new();
    http.get(format!("http://{addr}/coinbase/balance"))
        .header("CB-ACCESS-KEY", "user-1")
        .header("CB-ACCESS-SECRET", "secret-1")
        .send()
        .await
        .unwrap();

    let response = http
        .get(format!("http://{addr}/coinbase/history"))
        .header("CB-ACCESS-KEY", "user-1")
        .header("CB-ACCESS-SECRET", "secret-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["body"], serde_json::json!(["200.00"]));
}

#[tokio::test]
async fn test_history_is_empty_before_any_balance_call() {
    let upstream = MockServer::start().await;
    let addr = spawn_service(&upstream).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/coinbase/history"))
        .header("CB-ACCESS-KEY", "user-1")
        .header("CB-ACCESS-SECRET", "secret-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["body"], serde_json::json!([]));
}

#[tokio::test]
async fn test_history_rejects_missing_credentials() {
    let upstream = MockServer::start().await;
    let addr = spawn_service(&upstream).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/coinbase/history"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
}
