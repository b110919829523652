use std::{fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use reqwest::{Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::types::{FetchError, FetchResult, Fetched};

use super::metrics::RequestMetrics;

/// Maximum attempts for one logical request, first try included.
const MAX_ATTEMPTS: u32 = 3;
/// Delay applied after a 429 that carries no `Retry-After` header.
const RATE_LIMIT_FALLBACK_DELAY: Duration = Duration::from_secs(1);
/// Flat delay applied after a retryable server error (500 or 503).
const SERVER_ERROR_DELAY: Duration = Duration::from_secs(2);

/// Trait implemented by structures capable of performing raw HTTP requests
/// against the Riot API.
#[async_trait]
pub trait ApiRequest: Send + Sync + Debug {
    async fn request(&self, url: String) -> FetchResult<Bytes>;
}

/// Decode a raw fetch outcome into a typed payload, letting a confirmed
/// absence pass through untouched.
pub fn decode_json<T: DeserializeOwned>(raw: Fetched<Bytes>) -> FetchResult<T> {
    match raw {
        Fetched::Found(bytes) => Ok(Fetched::Found(serde_json::from_slice(&bytes)?)),
        Fetched::NotFound => Ok(Fetched::NotFound),
    }
}

/// Rate-limited HTTP client shared by every endpoint wrapper.
#[derive(Debug)]
pub struct ApiClientBase {
    client: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Riot API Key
    key: String,
    pub metrics: Arc<RequestMetrics>,
}

impl ApiClientBase {
    pub fn new(api_key: String) -> Self {
        let q = Quota::per_minute(nonzero!(100_u32)).allow_burst(nonzero!(20_u32));

        Self {
            client: reqwest::Client::new(),
            limiter: RateLimiter::direct(q),
            key: api_key,
            metrics: RequestMetrics::new("riot"),
        }
    }

    /// Perform one logical GET with the retry policy:
    /// - 200 returns the body, 404 returns [`Fetched::NotFound`];
    /// - 429 sleeps for the `Retry-After` hint (fallback 1s) and retries;
    /// - 500 and 503 sleep a flat 2s and retry; every other status is a
    ///   terminal failure raised immediately.
    ///
    /// Delays are flat, without jitter, so the total wait per request stays
    /// bounded by `MAX_ATTEMPTS x max(delay)`.
    pub async fn request(&self, url: String) -> FetchResult<Bytes> {
        let mut last_retryable: Option<(StatusCode, String)> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            // Ensure we do not violate the Riot API rate limits before doing
            // any request.
            self.limiter.until_ready().await;
            self.metrics.inc();

            let res = self
                .client
                .get(&url)
                .header("X-Riot-Token", &self.key)
                .send()
                .await?;

            let status = res.status();
            match status {
                StatusCode::OK => return Ok(Fetched::Found(res.bytes().await?)),
                StatusCode::NOT_FOUND => return Ok(Fetched::NotFound),
                StatusCode::TOO_MANY_REQUESTS => {
                    let delay = retry_after(&res).unwrap_or(RATE_LIMIT_FALLBACK_DELAY);
                    last_retryable = Some((status, body_or_empty(res).await));
                    warn!(
                        "rate limited (attempt {attempt}/{MAX_ATTEMPTS}), retrying in {}s",
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                }
                StatusCode::INTERNAL_SERVER_ERROR | StatusCode::SERVICE_UNAVAILABLE => {
                    last_retryable = Some((status, body_or_empty(res).await));
                    warn!(
                        "server error {status} (attempt {attempt}/{MAX_ATTEMPTS}), retrying in {}s",
                        SERVER_ERROR_DELAY.as_secs()
                    );
                    tokio::time::sleep(SERVER_ERROR_DELAY).await;
                }
                _ => {
                    return Err(FetchError::Status {
                        status,
                        body: body_or_empty(res).await,
                    });
                }
            }
        }

        let (status, body) =
            last_retryable.expect("the retry loop records every retryable response");
        Err(FetchError::RetriesExhausted { status, body })
    }
}

/// `Retry-After` hint in seconds, taken verbatim when present.
fn retry_after(res: &Response) -> Option<Duration> {
    res.headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

async fn body_or_empty(res: Response) -> String {
    res.text().await.unwrap_or_default()
}
