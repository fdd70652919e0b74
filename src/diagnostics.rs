//! Diagnostics sink for crawl events
//!
//! The engine reports fetch failures to an injected sink instead of logging
//! globally, so callers decide where events go. The default sink forwards
//! to `tracing`; tests collect events in memory.

use crate::FetchError;

/// Receives fetch-failure events from the crawl engine
///
/// One event is emitted per failed attempt, including the attempt number,
/// so a retried-then-successful fetch still leaves a trace of its failures.
pub trait DiagnosticsSink: Send + Sync {
    /// Called after each failed fetch attempt
    fn fetch_failure(&self, seed: &str, url: &str, attempt: u32, error: &FetchError);
}

/// Diagnostics sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn fetch_failure(&self, seed: &str, url: &str, attempt: u32, error: &FetchError) {
        tracing::warn!(
            seed,
            url,
            attempt,
            "Fetch attempt failed: {}",
            error
        );
    }
}
