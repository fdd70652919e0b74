//! Result aggregation
//!
//! Folds per-seed link lists into buckets keyed by seed URL or seed
//! netloc, and tallies link counts by file-type suffix. Uniqueness, when
//! enabled, applies to each seed's contribution as it arrives — two seeds
//! feeding the same bucket can still deposit the same link twice.

use crate::config::AggregationConfig;
use crate::crawler::engine::Link;
use crate::url::netloc;
use std::collections::{HashMap, HashSet};
use url::Url;

/// The accumulated output of a run
///
/// Bucket keys are unique; links within a bucket keep their accumulation
/// order. Cross-bucket ordering carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    /// Bucket key -> accumulated links
    pub buckets: HashMap<String, Vec<Link>>,

    /// File-type suffix -> total occurrences across all buckets
    pub type_counts: HashMap<String, u64>,
}

impl AggregateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one seed's links into the report
    ///
    /// # Arguments
    ///
    /// * `seed` - The seed the links were discovered from
    /// * `links` - That seed's links, in discovery order
    /// * `options` - Bucketing and uniqueness configuration
    pub fn aggregate(&mut self, seed: &Url, links: Vec<Link>, options: &AggregationConfig) {
        let key = if options.group_by_domain {
            netloc(seed)
        } else {
            seed.as_str().to_string()
        };

        let links = if options.unique_links {
            dedup(links)
        } else {
            links
        };

        for link in &links {
            *self.type_counts.entry(link.file_type.clone()).or_insert(0) += 1;
        }

        self.buckets.entry(key).or_default().extend(links);
    }

    /// Total number of links across all buckets
    pub fn total_links(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket keys in sorted order, for deterministic export
    pub fn sorted_keys(&self) -> Vec<&String> {
        let mut keys: Vec<&String> = self.buckets.keys().collect();
        keys.sort();
        keys
    }
}

/// Reduces a link list to distinct URLs, first occurrence kept
fn dedup(links: Vec<Link>) -> Vec<Link> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}
