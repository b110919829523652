use reqwest::StatusCode;
use thiserror::Error;

/// Terminal failure of one logical fetch. Transient conditions (429, 500,
/// 503) are retried inside the client and only surface here once the retry
/// budget is spent.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("retries exhausted, last response HTTP {status}: {body}")]
    RetriesExhausted { status: StatusCode, body: String },

    #[error("decoding response failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outcome of a fetch that can legitimately miss: a 404 is data, not a
/// failure, and callers must be able to tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched<T> {
    Found(T),
    NotFound,
}

impl<T> Fetched<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Found(value) => Fetched::Found(f(value)),
            Fetched::NotFound => Fetched::NotFound,
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Fetched::Found(value) => Some(value),
            Fetched::NotFound => None,
        }
    }
}

/// A call to the Riot API either succeeds, confirms absence, or fails with a
/// [`FetchError`].
pub type FetchResult<T> = Result<Fetched<T>, FetchError>;
