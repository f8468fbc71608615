//! Coinbase REST API client implementation.

use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;

use crate::auth::{Credentials, SignedRequest};
use crate::error::{ApiFailure, ServiceError};
use crate::rest::endpoints::{API_VERSION, COINBASE_BASE_URL};
use crate::rest::types::ApiEnvelope;

/// Outcome of one upstream call whose transport succeeded.
///
/// An error envelope is data about the upstream's decision, not a transport
/// failure; callers must handle both arms instead of conflating a rejection
/// with "no data".
#[derive(Debug)]
pub enum ApiOutcome<T> {
    /// The upstream returned a `data` payload.
    Success(T),
    /// The upstream returned an `errors` envelope.
    Failure(ApiFailure),
}

impl<T> ApiOutcome<T> {
    /// Convert the failure arm into a hard error.
    pub fn into_result(self) -> Result<T, ServiceError> {
        match self {
            ApiOutcome::Success(data) => Ok(data),
            ApiOutcome::Failure(failure) => Err(ServiceError::Api(failure)),
        }
    }
}

/// The Coinbase REST API client.
///
/// Holds only the HTTP transport and base URL. Caller credentials are passed
/// into each signed operation, never stored on the client.
///
/// # Example
///
/// ```rust,no_run
/// use coinbase_balance_service::auth::Credentials;
/// use coinbase_balance_service::rest::CoinbaseRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinbaseRestClient::new();
///     let credentials = Credentials::new("api_key", "api_secret");
///     let holdings = client.get_amount_per_currency(&credentials).await?;
///     println!("Holdings: {:?}", holdings);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinbaseRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
}

impl CoinbaseRestClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> CoinbaseRestClientBuilder {
        CoinbaseRestClientBuilder::new()
    }

    /// Make a signed GET request.
    ///
    /// The endpoint may carry a query string; the signature covers it.
    pub(crate) async fn signed_get<T>(
        &self,
        credentials: &Credentials,
        endpoint: &str,
    ) -> Result<ApiOutcome<T>, ServiceError>
    where
        T: DeserializeOwned,
    {
        let timestamp = OffsetDateTime::now_utc().unix_timestamp();
        let request = SignedRequest::build(credentials, "GET", endpoint, "", timestamp)?;

        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http_client
            .get(&url)
            .header("CB-ACCESS-SIGN", &request.signature)
            .header("CB-ACCESS-TIMESTAMP", request.timestamp.to_string())
            .header("CB-ACCESS-KEY", &credentials.api_key)
            .header("CB-VERSION", API_VERSION)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_LANGUAGE, &credentials.locale)
            .send()
            .await?;

        self.parse_response(response).await
    }

    /// Make a public GET request (no signature headers).
    pub(crate) async fn public_get<T>(
        &self,
        endpoint: &str,
        locale: &str,
    ) -> Result<ApiOutcome<T>, ServiceError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http_client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_LANGUAGE, locale)
            .send()
            .await?;

        self.parse_response(response).await
    }

    /// Make a public GET request with query parameters.
    pub(crate) async fn public_get_with_params<T, Q>(
        &self,
        endpoint: &str,
        locale: &str,
        params: &Q,
    ) -> Result<ApiOutcome<T>, ServiceError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let query_string = serde_urlencoded::to_string(params)
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        let endpoint = if query_string.is_empty() {
            endpoint.to_owned()
        } else {
            format!("{endpoint}?{query_string}")
        };
        self.public_get(&endpoint, locale).await
    }

    /// Parse a response envelope from the Coinbase API.
    async fn parse_response<T>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiOutcome<T>, ServiceError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            ServiceError::InvalidResponse(format!(
                "failed to parse response: {e}. HTTP {status}, body: {body}"
            ))
        })?;

        if !envelope.errors.is_empty() {
            return Ok(ApiOutcome::Failure(ApiFailure::from_errors(&envelope.errors)));
        }

        match envelope.data {
            Some(data) => Ok(ApiOutcome::Success(data)),
            None => Err(ServiceError::InvalidResponse(format!(
                "response missing 'data' field (HTTP {status})"
            ))),
        }
    }
}

impl Default for CoinbaseRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CoinbaseRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseRestClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for [`CoinbaseRestClient`].
pub struct CoinbaseRestClientBuilder {
    base_url: String,
    user_agent: Option<String>,
}

impl CoinbaseRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: COINBASE_BASE_URL.to_string(),
            user_agent: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> CoinbaseRestClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("coinbase-balance-service/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coinbase-balance-service"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        // No retry middleware: failures surface to the caller untouched.
        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        CoinbaseRestClient {
            http_client: client,
            base_url: self.base_url,
        }
    }
}

impl Default for CoinbaseRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
