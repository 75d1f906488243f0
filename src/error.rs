//! Error types for bounty-board API calls.
//!
//! Every failed network call is classified exactly once, in the client's
//! response pipeline, into an [`ApiError`] tagged with an [`ErrorKind`].
//! Callers branch on [`ApiError::kind`] rather than on the raw status code.
//!
//! Building a [`Client`](crate::Client) can fail separately with a
//! [`ConfigError`]; that never happens once a client exists.

use crate::rate_limit::RateLimitInfo;
use http::{HeaderMap, StatusCode};
use std::fmt;

/// The classification of a failed API call.
///
/// | HTTP status                 | Kind          |
/// |-----------------------------|---------------|
/// | 404                         | [`NotFound`](ErrorKind::NotFound)     |
/// | 400                         | [`Validation`](ErrorKind::Validation) |
/// | 429                         | [`RateLimit`](ErrorKind::RateLimit)   |
/// | 500 and above               | [`Server`](ErrorKind::Server)         |
/// | anything else, or no status | [`Api`](ErrorKind::Api)               |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic API error: transport failures, timeouts, unexpected statuses
    /// and undecodable bodies.
    Api,
    /// The server returned 404.
    NotFound,
    /// The server returned 400.
    Validation,
    /// The server returned 429.
    RateLimit,
    /// The server returned a 5xx status.
    Server,
}

impl ErrorKind {
    /// Maps an HTTP status to its kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use bountyboard::ErrorKind;
    /// use http::StatusCode;
    ///
    /// assert_eq!(ErrorKind::from_status(StatusCode::NOT_FOUND), ErrorKind::NotFound);
    /// assert_eq!(ErrorKind::from_status(StatusCode::BAD_GATEWAY), ErrorKind::Server);
    /// assert_eq!(ErrorKind::from_status(StatusCode::UNAUTHORIZED), ErrorKind::Api);
    /// ```
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            404 => ErrorKind::NotFound,
            400 => ErrorKind::Validation,
            429 => ErrorKind::RateLimit,
            s if s >= 500 => ErrorKind::Server,
            _ => ErrorKind::Api,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Api => "API error",
            ErrorKind::NotFound => "Not found",
            ErrorKind::Validation => "Validation error",
            ErrorKind::RateLimit => "Rate limit exceeded",
            ErrorKind::Server => "Server error",
        };
        f.write_str(label)
    }
}

/// A classified error from a bounty-board API call.
///
/// All kinds share the same fields: a message, the HTTP status when a
/// response was received, and the upstream error code when the server sent
/// one. The raw body is kept for debugging.
///
/// # Examples
///
/// ```no_run
/// use bountyboard::{Client, ErrorKind};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new()?;
///
/// match client.get_bounties().await {
///     Ok(bounties) => println!("{} bounties", bounties.len()),
///     Err(e) if e.kind() == ErrorKind::RateLimit => {
///         eprintln!("Throttled, retry after {:?}", e.retry_after());
///     }
///     Err(e) => eprintln!("{} (status {:?}, code {:?})", e, e.status(), e.code()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
#[error("{kind}: {message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    code: Option<String>,
    raw_response: Option<String>,
    rate_limit_info: Option<RateLimitInfo>,
    #[source]
    source: Option<reqwest::Error>,
}

impl ApiError {
    /// Creates an error of the given kind with no status, code or body.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            code: None,
            raw_response: None,
            rate_limit_info: None,
            source: None,
        }
    }

    /// Classifies a non-2xx response.
    ///
    /// The message comes from the body's `message` (or `error`) string when
    /// the body is JSON and carries one; the code from its `code` field.
    pub(crate) fn from_response(
        status: StatusCode,
        headers: &HeaderMap,
        raw_response: String,
    ) -> Self {
        let kind = ErrorKind::from_status(status);
        let body = serde_json::from_str::<serde_json::Value>(&raw_response).ok();

        let message = body
            .as_ref()
            .and_then(server_message)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        let code = body.as_ref().and_then(server_code);
        let rate_limit_info =
            (kind == ErrorKind::RateLimit).then(|| RateLimitInfo::from_headers(headers));

        Self {
            kind,
            message,
            status: Some(status),
            code,
            raw_response: Some(raw_response),
            rate_limit_info,
            source: None,
        }
    }

    /// Classifies a failure that produced no usable response.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        Self {
            kind: ErrorKind::Api,
            message: error.to_string(),
            status: error.status(),
            code: None,
            raw_response: None,
            rate_limit_info: None,
            source: Some(error),
        }
    }

    /// A 2xx body that did not match the expected shape.
    pub(crate) fn deserialization(
        status: StatusCode,
        raw_response: String,
        error: &serde_json::Error,
    ) -> Self {
        Self {
            status: Some(status),
            raw_response: Some(raw_response),
            ..Self::new(ErrorKind::Api, format!("Invalid JSON response: {error}"))
        }
    }

    /// Sets the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the upstream error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// The classification of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Server-provided message if there was one, otherwise the transport message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// The upstream error code, if the server sent one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The raw response body, if one was received.
    pub fn raw_response(&self) -> Option<&str> {
        self.raw_response.as_deref()
    }

    /// Rate limit hints. Only present on [`ErrorKind::RateLimit`] errors.
    pub fn rate_limit_info(&self) -> Option<&RateLimitInfo> {
        self.rate_limit_info.as_ref()
    }

    /// Shortcut for the `Retry-After` hint of a rate-limit error.
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        self.rate_limit_info.as_ref()?.retry_after
    }

    /// Returns `true` for [`ErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        self.source.as_ref().is_some_and(reqwest::Error::is_timeout)
    }
}

fn server_message(body: &serde_json::Value) -> Option<String> {
    ["message", "error"]
        .into_iter()
        .find_map(|field| body.get(field)?.as_str())
        .map(str::to_owned)
}

fn server_code(body: &serde_json::Value) -> Option<String> {
    match body.get("code")? {
        serde_json::Value::String(code) => Some(code.clone()),
        serde_json::Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}

/// Errors raised while configuring a [`Client`](crate::Client).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A default header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// A specialized `Result` type for bounty-board API calls.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_status_classification() {
        let cases = [
            (404, ErrorKind::NotFound),
            (400, ErrorKind::Validation),
            (429, ErrorKind::RateLimit),
            (500, ErrorKind::Server),
            (503, ErrorKind::Server),
            (401, ErrorKind::Api),
            (403, ErrorKind::Api),
            (409, ErrorKind::Api),
            (302, ErrorKind::Api),
        ];

        for (code, expected) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(ErrorKind::from_status(status), expected, "status {code}");
        }
    }

    #[test]
    fn test_from_response_uses_server_message_and_code() {
        let body = r#"{"message":"title is required","code":"E_TITLE"}"#.to_string();
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, &HeaderMap::new(), body);

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "title is required");
        assert_eq!(err.code(), Some("E_TITLE"));
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(err.rate_limit_info().is_none());
    }

    #[test]
    fn test_from_response_error_field_and_numeric_code() {
        let body = r#"{"error":"boom","code":5001}"#.to_string();
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, &HeaderMap::new(), body);

        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.message(), "boom");
        assert_eq!(err.code(), Some("5001"));
    }

    #[test]
    fn test_from_response_plain_text_body() {
        let err = ApiError::from_response(
            StatusCode::NOT_FOUND,
            &HeaderMap::new(),
            "Cannot GET /treasury".to_string(),
        );

        assert!(err.is_not_found());
        assert_eq!(err.message(), "Request failed with status code 404");
        assert_eq!(err.code(), None);
        assert_eq!(err.raw_response(), Some("Cannot GET /treasury"));
        assert_eq!(err.to_string(), "Not found: Request failed with status code 404");
    }

    #[test]
    fn test_rate_limit_error_carries_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("30"));
        let err = ApiError::from_response(
            StatusCode::TOO_MANY_REQUESTS,
            &headers,
            String::new(),
        );

        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.retry_after(), Some(std::time::Duration::from_secs(30)));
    }

    #[test]
    fn test_builder_style_constructors() {
        let err = ApiError::new(ErrorKind::Api, "offline")
            .with_status(StatusCode::FORBIDDEN)
            .with_code("E_FORBIDDEN");

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.code(), Some("E_FORBIDDEN"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_deserialization_error_is_generic() {
        let serde_err = serde_json::from_str::<Vec<u8>>("nope").unwrap_err();
        let err = ApiError::deserialization(StatusCode::OK, "nope".to_string(), &serde_err);

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(StatusCode::OK));
        assert!(err.message().starts_with("Invalid JSON response"));
    }
}
