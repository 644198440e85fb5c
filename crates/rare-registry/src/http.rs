//! Shared HTTP response helpers for registry clients.
//!
//! Centralizes status-code checks (404 as "absent", 429 rate limiting with
//! `Retry-After` parsing, non-success → [`RegistryError::Api`]), cursor
//! pagination via the `Link` header, and client-side request pacing so the
//! individual registry modules stay focused on request construction and
//! response mapping.

use std::time::Duration;

use reqwest::{StatusCode, header::HeaderMap};
use tokio::{sync::Mutex, time::Instant};

use crate::error::RegistryError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`RegistryError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`RegistryError::Api`] with status code and
///   response body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, RegistryError> {
    if resp.status() == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = parse_retry_after(&resp);
        return Err(RegistryError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(RegistryError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Like [`check_response`], but a 404 means the registry has no such record.
pub async fn check_optional(
    resp: reqwest::Response,
) -> Result<Option<reqwest::Response>, RegistryError> {
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    check_response(resp).await.map(Some)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}

/// Extract the `rel="next"` URL from a `Link` header.
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(reqwest::header::LINK)?.to_str().ok()?;
    link.split(',')
        .find(|part| part.contains("rel=\"next\""))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            (start < end).then(|| part[start..end].to_string())
        })
}

/// Enforces a minimum interval between consecutive requests from one client.
///
/// PubChem rejects clients above 5 requests/second; the other registries ask
/// for similar courtesy.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until the next request may be sent, then claim the slot.
    pub async fn acquire(&self) {
        if self.min_interval.is_zero() {
            return;
        }
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            tokio::time::sleep_until(prev + self.min_interval).await;
        }
        *last = Some(Instant::now());
    }
}
