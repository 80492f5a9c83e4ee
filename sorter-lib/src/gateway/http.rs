//! JSON-over-HTTP gateway

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

use super::FetchRequest;
use super::FetchResult;
use super::PersistRequest;
use super::RemoteDataGateway;
use crate::error::ErrorPayload;
use crate::error::GatewayError;

const FETCH_PATH: &str = "records";
const PERSIST_PATH: &str = "sort-order";

/// Connection settings for [`HttpGateway`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sorter_lib::gateway::HttpGatewayConfig;
///
/// let config = HttpGatewayConfig::new("https://example.com/services/sorter")
///     .unwrap()
///     .with_bearer_token("token")
///     .with_timeout(Duration::from_secs(30));
/// assert_eq!(config.base_url().as_str(), "https://example.com/services/sorter/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    base_url: Url,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
}

impl HttpGatewayConfig {
    /// Creates a config for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidUrl`] if the URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| GatewayError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            base_url,
            bearer_token: None,
            timeout: None,
        })
    }

    /// Sets the bearer token sent with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the base URL (always ending in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::InvalidUrl(format!("{path}: {e}")))
    }
}

/// A gateway that posts JSON to two endpoints under a base URL.
///
/// - `POST {base}/records` with a [`FetchRequest`] body, answered by a
///   [`FetchResult`] body
/// - `POST {base}/sort-order` with a [`PersistRequest`] body
///
/// Non-success responses become [`GatewayError::Remote`], with the message
/// from a `{"message": ...}` or `[{"message": ...}]` body as the payload.
///
/// This client is cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: HttpGatewayConfig,
    http_client: Client,
}

impl HttpGateway {
    /// Creates a gateway with a default HTTP client.
    pub fn new(config: HttpGatewayConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Creates a gateway using the given HTTP client.
    pub fn with_client(config: HttpGatewayConfig, http_client: Client) -> Self {
        Self { config, http_client }
    }

    /// Returns the connection settings.
    pub fn config(&self) -> &HttpGatewayConfig {
        &self.config
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<RequestBuilder, GatewayError> {
        let url = self.config.endpoint(path)?;
        let mut request = self.http_client.post(url).json(body);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, GatewayError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_success() {
            Ok(body)
        } else {
            log::error!("HttpGateway: HTTP {} from remote", status.as_u16());
            Err(GatewayError::http(status.as_u16(), parse_error_payload(&body), body))
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> GatewayError {
        match self.config.timeout {
            Some(timeout) if error.is_timeout() => GatewayError::Timeout(timeout),
            _ => GatewayError::Network(error),
        }
    }
}

#[async_trait]
impl RemoteDataGateway for HttpGateway {
    async fn fetch_ordered_records(&self, request: &FetchRequest) -> Result<FetchResult, GatewayError> {
        let body = self.send(self.post(FETCH_PATH, request)?).await?;
        serde_json::from_str(&body)
            .map_err(|e| GatewayError::parse_with_body(format!("invalid fetch response: {e}"), body))
    }

    async fn persist_order(&self, request: &PersistRequest) -> Result<(), GatewayError> {
        self.send(self.post(PERSIST_PATH, request)?).await.map(|_| ())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireErrorPayload {
    message: String,
    #[serde(default)]
    error_code: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireErrorBody {
    Single(WireErrorPayload),
    Many(Vec<WireErrorPayload>),
}

/// Extracts the structured error message from a response body.
///
/// Accepts `{"message": ..., "errorCode": ...}` and the list form
/// `[{"message": ...}, ...]` (the first entry wins).
pub fn parse_error_payload(body: &str) -> Option<ErrorPayload> {
    let wire = match serde_json::from_str::<WireErrorBody>(body).ok()? {
        WireErrorBody::Single(payload) => payload,
        WireErrorBody::Many(payloads) => payloads.into_iter().next()?,
    };
    Some(ErrorPayload {
        message: wire.message,
        code: wire.error_code,
    })
}
