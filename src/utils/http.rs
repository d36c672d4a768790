//! HTTP utilities shared by the service adapters
//!
//! Provides the fetch error taxonomy, a JSON GET helper, and rate limiting
//! for public APIs. Requests are never retried.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Error raised when a remote fetch does not produce a usable payload
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout...)
    Network(String),
    /// The server answered with a non-2xx status
    HttpStatus(u16),
    /// The body was not valid JSON or did not match the expected shape
    Parse(String),
}

impl FetchError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Request failed: {}", msg),
            FetchError::HttpStatus(code) => write!(f, "Unexpected status: {}", code),
            FetchError::Parse(msg) => write!(f, "Failed to parse response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Build a reqwest client with the given timeout
pub fn build_client(timeout: Duration) -> Result<Client, String> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("citelens/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {}", e))
}

/// Parse a response body, reporting schema mismatches as `FetchError::Parse`
pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// GET a URL and decode its JSON body
///
/// # Returns
/// * `Err(FetchError::Network)` - if no response arrived
/// * `Err(FetchError::HttpStatus)` - if the status is not 2xx
/// * `Err(FetchError::Parse)` - if the body does not decode into `T`
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    let resp = client.get(url).send().await?;

    let status = resp.status();
    if !status.is_success() {
        debug!("GET {} returned {}", url, status);
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = resp.text().await?;
    debug!("GET {} returned {} bytes", url, body.len());
    parse_json(&body)
}

/// Rate limiter for API endpoints
pub struct RateLimiter {
    /// Window size
    window: Duration,
    /// Maximum requests per window
    max_requests: u32,
    /// Request timestamps per endpoint
    requests: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `window` - Length of the sliding window
    /// * `max_requests` - Maximum requests allowed per window
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            requests: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a request can be made and record it
    ///
    /// # Returns
    /// * `true` if request is allowed
    /// * `false` if rate limit exceeded
    pub async fn check_and_record(&self, endpoint: &str) -> bool {
        let mut requests = self.requests.lock().await;
        let now = Instant::now();

        let timestamps = requests.entry(endpoint.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < self.window);

        if timestamps.len() >= self.max_requests as usize {
            debug!(
                "Rate limit hit for {}: {} requests in {:?}",
                endpoint,
                timestamps.len(),
                self.window
            );
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Wait until a request can be made
    pub async fn wait_for_slot(&self, endpoint: &str) {
        while !self.check_and_record(endpoint).await {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
}

/// Default rate limiters for public APIs
pub mod rate_limiters {
    use super::RateLimiter;
    use once_cell::sync::Lazy;
    use std::time::Duration;

    /// OpenAlex: 10 requests per second
    pub static OPENALEX: Lazy<RateLimiter> =
        Lazy::new(|| RateLimiter::new(Duration::from_secs(1), 10));
}

/// Local HTTP server answering a single request, for adapter tests
#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one response and return the base URL, e.g. `http://127.0.0.1:4312`
    pub async fn serve_once(status: u16, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }
}
