//! Crawl engine: bounded-depth pre-order traversal over one seed
//!
//! The traversal mirrors recursive descent but runs on an explicit frame
//! stack, one frame per fetched page, so the call stack stays flat and
//! cancellation can be honored between fetches. Invariants:
//! - a URL is marked visited before its page is fetched, so cyclic link
//!   graphs terminate
//! - a surviving link is appended to the result before its own descendants
//!   (pre-order), and descendants are appended before the next sibling
//! - fetch failures are retried, reported to diagnostics, and prune only
//!   their own subtree

use crate::config::Config;
use crate::crawler::fetcher::Fetch;
use crate::crawler::filter;
use crate::crawler::parser::extract_links;
use crate::diagnostics::DiagnosticsSink;
use crate::url::file_suffix;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A discovered hyperlink
///
/// The file-type suffix rides along for the aggregation tally; link
/// identity is the URL string alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub file_type: String,
}

impl Link {
    pub fn new(url: String) -> Self {
        let file_type = file_suffix(&url);
        Self { url, file_type }
    }
}

/// Links discovered from one seed, in discovery order
#[derive(Debug, Clone)]
pub struct CrawlResult {
    pub seed: Url,
    pub links: Vec<Link>,
}

/// One traversal frame: the surviving links of a fetched page plus the
/// depth budget left below that page
struct Frame {
    links: std::vec::IntoIter<String>,
    remaining: u32,
}

/// Orchestrates fetching, parsing, and filtering for one seed at a time
///
/// The engine holds no per-seed state; each `crawl` call owns a fresh
/// visited set, so the same URL reachable from two seeds is fetched once
/// per seed.
pub struct CrawlEngine {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetch>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    cancel: CancellationToken,
}

impl CrawlEngine {
    /// Creates an engine over the given fetch strategy and diagnostics sink
    pub fn new(
        config: Arc<Config>,
        fetcher: Arc<dyn Fetch>,
        diagnostics: Arc<dyn DiagnosticsSink>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            fetcher,
            diagnostics,
            cancel,
        }
    }

    /// Crawls one seed to the configured depth
    ///
    /// Never fails: fetch errors prune subtrees and the worst case is an
    /// empty result. Cancellation is honored at the next fetch boundary.
    pub async fn crawl(&self, seed: &Url) -> CrawlResult {
        let mut visited: HashSet<String> = HashSet::new();
        let mut links: Vec<Link> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        let depth = self.config.crawler.depth;
        if let Some(frame) = self.open_frame(seed, seed.as_str(), depth, &mut visited).await {
            stack.push(frame);
        }

        while let Some(top) = stack.last_mut() {
            match top.links.next() {
                Some(link) => {
                    let remaining = top.remaining;
                    links.push(Link::new(link.clone()));

                    // Descend before the next sibling; the visited check
                    // prunes cycles and repeat references.
                    if remaining > 0 && !visited.contains(&link) {
                        if let Some(frame) = self
                            .open_frame(seed, &link, remaining - 1, &mut visited)
                            .await
                        {
                            stack.push(frame);
                        }
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        tracing::debug!(
            seed = seed.as_str(),
            links = links.len(),
            pages = visited.len(),
            "Seed traversal complete"
        );

        CrawlResult {
            seed: seed.clone(),
            links,
        }
    }

    /// Fetches, parses, and filters one page, producing its frame
    ///
    /// Returns None when the subtree is pruned: cancellation, exhausted
    /// retries, or an unparseable page URL.
    async fn open_frame(
        &self,
        seed: &Url,
        url: &str,
        remaining: u32,
        visited: &mut HashSet<String>,
    ) -> Option<Frame> {
        if self.cancel.is_cancelled() {
            tracing::debug!(url, "Cancelled, skipping fetch");
            return None;
        }

        // Mark visited before descending; cycles terminate here.
        visited.insert(url.to_string());

        let body = self.fetch_with_retries(seed, url).await?;
        let page_url = Url::parse(url).ok()?;

        let survivors: Vec<String> = extract_links(&body, &page_url)
            .into_iter()
            .filter(|candidate| filter::passes(candidate, &page_url, &self.config.filters))
            .collect();

        // One delay per frame that still descends, between this fetch and
        // the first child fetch.
        let rate_limit = self.config.crawler.rate_limit();
        if remaining > 0 && !survivors.is_empty() && !rate_limit.is_zero() {
            tokio::time::sleep(rate_limit).await;
        }

        Some(Frame {
            links: survivors.into_iter(),
            remaining,
        })
    }

    /// Runs up to `retries` fetch attempts; the first success wins
    ///
    /// Every failed attempt is reported to diagnostics. Exhaustion returns
    /// None, pruning the subtree without touching siblings or ancestors.
    async fn fetch_with_retries(&self, seed: &Url, url: &str) -> Option<String> {
        let retries = self.config.crawler.retries;
        for attempt in 1..=retries {
            match self.fetcher.fetch(url).await {
                Ok(body) => return Some(body),
                Err(error) => {
                    self.diagnostics
                        .fetch_failure(seed.as_str(), url, attempt, &error);
                }
            }
        }
        tracing::debug!(url, retries, "Retries exhausted, pruning subtree");
        None
    }
}
