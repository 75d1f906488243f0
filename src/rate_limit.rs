//! Rate limit hints parsed from a `429 Too Many Requests` response.
//!
//! The client never waits or retries on its own. When the bounty board
//! throttles a call, the resulting [`ApiError`](crate::ApiError) carries a
//! [`RateLimitInfo`] so callers can decide how long to back off.

use http::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Information extracted from rate limit headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// When the rate limit window resets (`X-RateLimit-Reset` or `RateLimit-Reset`).
    pub reset_at: Option<SystemTime>,

    /// How long the server asked us to wait (`Retry-After`).
    pub retry_after: Option<Duration>,

    /// Number of requests remaining in the current window.
    pub remaining: Option<u64>,
}

impl RateLimitInfo {
    /// Extracts rate limit hints from response headers.
    ///
    /// Recognised headers:
    /// - `Retry-After` (delay-seconds or HTTP date)
    /// - `X-RateLimit-Reset` / `RateLimit-Reset` (Unix timestamp)
    /// - `X-RateLimit-Remaining`
    ///
    /// # Examples
    ///
    /// ```
    /// use bountyboard::rate_limit::RateLimitInfo;
    /// use http::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("retry-after", "60".parse().unwrap());
    ///
    /// let info = RateLimitInfo::from_headers(&headers);
    /// assert_eq!(info.retry_after, Some(std::time::Duration::from_secs(60)));
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            reset_at: parse_rate_limit_reset(headers),
            retry_after: parse_retry_after(headers),
            remaining: parse_rate_limit_remaining(headers),
        }
    }

    /// Returns the suggested wait before calling again, capped at `max_wait`.
    ///
    /// `retry_after` wins over `reset_at`. Returns `None` when the server gave
    /// no usable hint or the reset time is already in the past.
    pub fn delay(&self, max_wait: Duration) -> Option<Duration> {
        if let Some(retry_after) = self.retry_after {
            return Some(retry_after.min(max_wait));
        }

        let until_reset = self.reset_at?.duration_since(SystemTime::now()).ok()?;
        Some(until_reset.min(max_wait))
    }

    /// Returns `true` if the response carried none of the recognised headers.
    pub fn is_empty(&self) -> bool {
        self.reset_at.is_none() && self.retry_after.is_none() && self.remaining.is_none()
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let header = headers.get("retry-after")?.to_str().ok()?.trim();

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date_time = httpdate::parse_http_date(header).ok()?;
    date_time.duration_since(SystemTime::now()).ok()
}

fn parse_rate_limit_reset(headers: &HeaderMap) -> Option<SystemTime> {
    ["x-ratelimit-reset", "ratelimit-reset"]
        .into_iter()
        .filter_map(|name| headers.get(name)?.to_str().ok()?.trim().parse::<u64>().ok())
        .map(|timestamp| UNIX_EPOCH + Duration::from_secs(timestamp))
        .next()
}

fn parse_rate_limit_remaining(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("x-ratelimit-remaining")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("60"));

        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_parse_retry_after_http_date() {
        let mut headers = HeaderMap::new();
        let future = SystemTime::now() + Duration::from_secs(120);
        headers.insert(
            "retry-after",
            HeaderValue::from_str(&httpdate::fmt_http_date(future)).unwrap(),
        );

        let delay = parse_retry_after(&headers).unwrap();
        assert!(delay <= Duration::from_secs(120));
        assert!(delay >= Duration::from_secs(110));
    }

    #[test]
    fn test_parse_retry_after_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("soon"));

        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_parse_rate_limit_reset_prefers_x_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("2000000000"));
        headers.insert("ratelimit-reset", HeaderValue::from_static("1000"));

        assert_eq!(
            parse_rate_limit_reset(&headers),
            Some(UNIX_EPOCH + Duration::from_secs(2_000_000_000))
        );
    }

    #[test]
    fn test_parse_rate_limit_reset_draft_header() {
        let mut headers = HeaderMap::new();
        headers.insert("ratelimit-reset", HeaderValue::from_static("1000"));

        assert_eq!(
            parse_rate_limit_reset(&headers),
            Some(UNIX_EPOCH + Duration::from_secs(1000))
        );
    }

    #[test]
    fn test_parse_rate_limit_remaining() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("42"));

        assert_eq!(parse_rate_limit_remaining(&headers), Some(42));
    }

    #[test]
    fn test_info_from_empty_headers() {
        let info = RateLimitInfo::from_headers(&HeaderMap::new());
        assert!(info.is_empty());
        assert_eq!(info.delay(Duration::from_secs(300)), None);
    }

    #[test]
    fn test_delay_capped_by_max_wait() {
        let info = RateLimitInfo {
            reset_at: None,
            retry_after: Some(Duration::from_secs(600)),
            remaining: Some(0),
        };

        assert_eq!(
            info.delay(Duration::from_secs(300)),
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn test_delay_from_reset_time() {
        let info = RateLimitInfo {
            reset_at: Some(SystemTime::now() + Duration::from_secs(2)),
            retry_after: None,
            remaining: Some(0),
        };

        let delay = info.delay(Duration::from_secs(300)).unwrap();
        assert!(delay <= Duration::from_secs(2));
        assert!(delay >= Duration::from_secs(1));
    }

    #[test]
    fn test_delay_reset_in_past() {
        let info = RateLimitInfo {
            reset_at: Some(UNIX_EPOCH + Duration::from_secs(1000)),
            retry_after: None,
            remaining: None,
        };

        assert_eq!(info.delay(Duration::from_secs(300)), None);
    }
}
