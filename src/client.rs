//! Typed client for the bounty-board API.
//!
//! The [`Client`] type is the main entry point. Use [`ClientBuilder`] to
//! override the base URL, timeout or headers.

use crate::{
    fallback,
    filter::BountyFilter,
    models::{Bounty, BountyStatus, RatioData, SwarmStats, TokenInfo, TreasuryStats},
    ApiError, ConfigError, ErrorKind, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Production bounty-board API.
pub const DEFAULT_BASE_URL: &str = "https://bounty.owockibot.xyz";

/// Per-request timeout unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// `User-Agent` sent with every request unless overridden.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The endpoints this client consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    BountyBoard,
    Treasury,
    Token,
    Ratio,
    Stats,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::BountyBoard => "/bounty-board",
            Endpoint::Treasury => "/treasury",
            Endpoint::Token => "/token",
            Endpoint::Ratio => "/ratio",
            Endpoint::Stats => "/stats",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Client for the bounty-board API.
///
/// Cheap to clone: clones share the connection pool and the configuration,
/// which never changes after [`ClientBuilder::build`]. Calls are independent
/// and may run concurrently.
///
/// # Examples
///
/// ```no_run
/// use bountyboard::Client;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::builder()
///     .base_url("https://bounty.owockibot.xyz")?
///     .timeout(Duration::from_secs(5))
///     .build()?;
///
/// for bounty in client.get_open_bounties().await? {
///     println!("#{} {} ({} USDC)", bounty.id, bounty.title, bounty.reward_usdc);
/// }
///
/// let (treasury, swarm) = tokio::join!(client.get_treasury_stats(), client.get_swarm_stats());
/// println!("Treasury: {}", treasury?.treasury_value);
/// println!("Agents: {}", swarm?.agent_count);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
    timeout: Duration,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client with the default base URL, timeout and headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new() -> std::result::Result<Self, ConfigError> {
        ClientBuilder::new().build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The configured base URL, exactly as it was supplied.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetches the full bounty list.
    pub async fn get_bounties(&self) -> Result<Vec<Bounty>> {
        self.get_json(Endpoint::BountyBoard).await
    }

    /// Looks up a bounty by id in the full list.
    ///
    /// Returns `Ok(None)` when no bounty has that id. Errors only if the list
    /// itself could not be fetched.
    pub async fn get_bounty(&self, id: u64) -> Result<Option<Bounty>> {
        let bounties = self.get_bounties().await?;
        Ok(bounties.into_iter().find(|b| b.id == id))
    }

    /// Fetches the list once and keeps the bounties matching `filter`.
    pub async fn filter_bounties(&self, filter: &BountyFilter) -> Result<Vec<Bounty>> {
        let bounties = self.get_bounties().await?;
        Ok(filter.apply(bounties))
    }

    /// Bounties whose status equals `status`.
    pub async fn get_bounties_by_status(&self, status: BountyStatus) -> Result<Vec<Bounty>> {
        self.filter_bounties(&BountyFilter::new().with_status(status))
            .await
    }

    /// Bounties still open for claiming.
    pub async fn get_open_bounties(&self) -> Result<Vec<Bounty>> {
        self.get_bounties_by_status(BountyStatus::Open).await
    }

    /// Bounties that have been paid out.
    pub async fn get_completed_bounties(&self) -> Result<Vec<Bounty>> {
        self.get_bounties_by_status(BountyStatus::Completed).await
    }

    /// Case-insensitive search over titles and descriptions.
    ///
    /// An empty keyword returns the whole list.
    pub async fn search_bounties(&self, keyword: &str) -> Result<Vec<Bounty>> {
        self.filter_bounties(&BountyFilter::new().search(keyword))
            .await
    }

    /// Bounties whose creator address equals `address`, ignoring case.
    pub async fn get_bounties_by_creator(&self, address: &str) -> Result<Vec<Bounty>> {
        self.filter_bounties(&BountyFilter::new().with_creator(address))
            .await
    }

    /// Bounties claimed by `address`, ignoring case. Unclaimed bounties are never returned.
    pub async fn get_bounties_by_claimer(&self, address: &str) -> Result<Vec<Bounty>> {
        self.filter_bounties(&BountyFilter::new().with_claimer(address))
            .await
    }

    /// Treasury holdings. Falls back to [`fallback::treasury_stats`] on 404.
    pub async fn get_treasury_stats(&self) -> Result<TreasuryStats> {
        let result = self.get_json(Endpoint::Treasury).await;
        or_fallback(Endpoint::Treasury, result, fallback::treasury_stats)
    }

    /// Token metadata. Falls back to [`fallback::token_info`] on 404.
    pub async fn get_token_info(&self) -> Result<TokenInfo> {
        let result = self.get_json(Endpoint::Token).await;
        or_fallback(Endpoint::Token, result, fallback::token_info)
    }

    /// Market cap to treasury ratio. Falls back to [`fallback::ratio_data`] on 404.
    pub async fn get_ratio_data(&self) -> Result<RatioData> {
        let result = self.get_json(Endpoint::Ratio).await;
        or_fallback(Endpoint::Ratio, result, fallback::ratio_data)
    }

    /// Swarm activity figures.
    ///
    /// On 404 the figures come from [`fallback::swarm_stats`], computed over
    /// the live bounty list. If that list cannot be fetched either, it is
    /// treated as empty and the failure is only logged.
    pub async fn get_swarm_stats(&self) -> Result<SwarmStats> {
        match self.get_json(Endpoint::Stats).await {
            Err(error) if error.is_not_found() => {
                tracing::info!(
                    endpoint = %Endpoint::Stats,
                    "Endpoint not available, using fallback data"
                );
                let bounties = self.get_bounties().await.unwrap_or_else(|error| {
                    tracing::warn!(
                        error = %error,
                        "Bounty list unavailable, computing swarm stats from an empty list"
                    );
                    Vec::new()
                });
                Ok(fallback::swarm_stats(&bounties))
            }
            other => other,
        }
    }

    /// Returns `true` if the bounty list can be fetched. Never errors.
    pub async fn ping(&self) -> bool {
        match self.get_bounties().await {
            Ok(_) => true,
            Err(error) => {
                tracing::debug!(error = %error, "Ping failed");
                false
            }
        }
    }

    /// Issues a GET and decodes the JSON body.
    ///
    /// This is the only place responses are inspected: every failure leaves
    /// here already classified.
    async fn get_json<T>(&self, endpoint: Endpoint) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let start_time = Instant::now();
        let response = self.execute_request(endpoint).await?;
        self.parse_response(endpoint, response, start_time.elapsed())
            .await
    }

    async fn execute_request(&self, endpoint: Endpoint) -> Result<reqwest::Response> {
        let url = format!(
            "{}{}",
            self.inner.base_url.trim_end_matches('/'),
            endpoint.path()
        );

        tracing::debug!(method = %Method::GET, url = %url, "Executing HTTP request");

        let mut request = self
            .inner
            .http_client
            .request(Method::GET, url.as_str())
            .timeout(self.inner.timeout);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }

        request.send().await.map_err(|e| {
            tracing::warn!(
                error = %e,
                timeout = e.is_timeout(),
                endpoint = %endpoint,
                "Request failed"
            );
            ApiError::from_transport(e)
        })
    }

    async fn parse_response<T>(
        &self,
        endpoint: Endpoint,
        response: reqwest::Response,
        latency: Duration,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            endpoint = %endpoint,
            "Received HTTP response"
        );

        if !status.is_success() {
            let headers = response.headers().clone();
            let raw_response = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        endpoint = %endpoint,
                        "Failed to read error response body"
                    );
                    String::new()
                }
            };
            let error = ApiError::from_response(status, &headers, raw_response);
            log_classified(endpoint, status, &error);
            return Err(error);
        }

        let raw_body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e).with_status(status))?;

        serde_json::from_str::<T>(&raw_body).map_err(|e| {
            tracing::error!(
                error = %e,
                raw_response = %raw_body,
                endpoint = %endpoint,
                "Failed to deserialize response"
            );
            ApiError::deserialization(status, raw_body, &e)
        })
    }
}

fn log_classified(endpoint: Endpoint, status: StatusCode, error: &ApiError) {
    match error.kind() {
        ErrorKind::NotFound => {
            tracing::debug!(endpoint = %endpoint, "Endpoint returned 404");
        }
        ErrorKind::Server => {
            tracing::warn!(
                status = status.as_u16(),
                endpoint = %endpoint,
                error = %error,
                "Server error (5xx)"
            );
        }
        ErrorKind::Api | ErrorKind::Validation | ErrorKind::RateLimit => {
            tracing::error!(
                status = status.as_u16(),
                endpoint = %endpoint,
                error = %error,
                "Client error"
            );
        }
    }
}

/// Swaps a not-found error for fallback data. Every other outcome passes through.
fn or_fallback<T>(
    endpoint: Endpoint,
    result: Result<T>,
    fallback: impl FnOnce() -> T,
) -> Result<T> {
    match result {
        Err(error) if error.is_not_found() => {
            tracing::info!(endpoint = %endpoint, "Endpoint not available, using fallback data");
            Ok(fallback())
        }
        other => other,
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// Starts from [`DEFAULT_BASE_URL`], [`DEFAULT_TIMEOUT`] and the headers
/// `Content-Type: application/json` and `User-Agent: `[`USER_AGENT`].
///
/// # Examples
///
/// ```no_run
/// use bountyboard::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), bountyboard::ConfigError> {
/// let client = ClientBuilder::new()
///     .base_url("https://staging.example.com/api")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-agent/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    default_headers: HeaderMap,
    timeout: Duration,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        default_headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_headers,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        let url = url.into();
        Url::parse(&url)?;
        self.base_url = url;
        Ok(self)
    }

    /// Adds a header to every request, replacing a default of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> std::result::Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn build(self) -> std::result::Result<Client, ConfigError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: self.base_url,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
