//! Crawler module: traversal, filtering, fetching, and aggregation
//!
//! Each seed is traversed independently (own visited set, sequential
//! rate-limited fetches); distinct seeds run concurrently on a bounded
//! worker pool and fold into one shared report under a mutex.

mod aggregator;
mod engine;
mod fetcher;
mod filter;
mod parser;

pub use aggregator::AggregateReport;
pub use engine::{CrawlEngine, CrawlResult, Link};
pub use fetcher::{build_fetcher, Fetch, HttpFetcher, DEFAULT_USER_AGENT};
pub use filter::passes;
pub use parser::extract_links;

use crate::config::Config;
use crate::diagnostics::DiagnosticsSink;
use futures::StreamExt;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Crawls all seeds with the configured fetch strategy
///
/// This is the main library entry point. It builds the fetcher selected by
/// the configuration and runs every seed to completion; partial failures
/// degrade coverage but never abort the run.
///
/// # Arguments
///
/// * `seeds` - Seed URLs, one independent traversal each
/// * `config` - The validated run configuration
/// * `diagnostics` - Sink for fetch-failure events
/// * `cancel` - Run-wide cancellation, honored at fetch boundaries
///
/// # Returns
///
/// * `Ok(AggregateReport)` - The bucketed links and type tally
/// * `Err(HarvestError)` - Only fetcher construction can fail
pub async fn crawl_seeds(
    seeds: &[Url],
    config: Arc<Config>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    cancel: CancellationToken,
) -> crate::Result<AggregateReport> {
    let fetcher = build_fetcher(&config)?;
    Ok(crawl_seeds_with_fetcher(seeds, config, fetcher, diagnostics, cancel).await)
}

/// Crawls all seeds through an injected fetch strategy
///
/// Callers wanting a rendered fetch (or any other transport) supply their
/// own [`Fetch`] implementation here; the traversal semantics are
/// identical either way.
pub async fn crawl_seeds_with_fetcher(
    seeds: &[Url],
    config: Arc<Config>,
    fetcher: Arc<dyn Fetch>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    cancel: CancellationToken,
) -> AggregateReport {
    let report = Arc::new(Mutex::new(AggregateReport::new()));
    let concurrency = config.crawler.concurrency as usize;

    futures::stream::iter(seeds.iter().cloned())
        .map(|seed| {
            let engine = CrawlEngine::new(
                Arc::clone(&config),
                Arc::clone(&fetcher),
                Arc::clone(&diagnostics),
                cancel.clone(),
            );
            let config = Arc::clone(&config);
            let report = Arc::clone(&report);
            async move {
                tracing::info!(seed = seed.as_str(), "Crawling seed");
                let result = engine.crawl(&seed).await;
                tracing::info!(
                    seed = seed.as_str(),
                    links = result.links.len(),
                    "Seed finished"
                );

                // One aggregate call per seed, whole under the lock, so
                // concurrent completions never interleave bucket updates.
                let mut report = report.lock().unwrap();
                report.aggregate(&seed, result.links, &config.aggregation);
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<()>>()
        .await;

    let mut report = report.lock().unwrap();
    std::mem::take(&mut *report)
}
