//! Riot API client used by the tracker.
//!
//! The library offers typed wrappers around the official REST endpoints on
//! top of a fetch layer that retries transient failures (rate limits and
//! selected server errors) with flat, bounded delays.

pub mod api;
pub mod types;
