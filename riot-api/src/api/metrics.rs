//! Lightweight request accounting for the API client.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counts outbound requests so the log tells how much of the rate budget the
/// tracker is actually using.
#[derive(Debug)]
pub struct RequestMetrics {
    name: &'static str,
    total: AtomicU64,
}

impl RequestMetrics {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            total: AtomicU64::new(0),
        })
    }

    pub fn inc(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Log the request volume once per minute with the delta since the
    /// previous report.
    pub async fn log_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        // The first tick completes immediately; skip it so the first report
        // covers a full minute.
        interval.tick().await;

        let mut last_total = 0;
        loop {
            interval.tick().await;
            let total = self.total();
            tracing::info!(
                client = self.name,
                "📊 {} request(s) executed ({} in the last minute)",
                total,
                total - last_total
            );
            last_total = total;
        }
    }
}
