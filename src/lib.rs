//! Linkharvest: a bounded-depth hyperlink extractor
//!
//! This crate crawls one or more seed URLs up to a configurable depth,
//! filters discovered links by file type, keyword, and domain scope, and
//! aggregates them into per-source buckets ready for export.

pub mod config;
pub mod crawler;
pub mod diagnostics;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for linkharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// These are the only fatal errors in the system: they surface once at
/// startup, before any fetch happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// Errors produced by a single fetch attempt
///
/// Fetch errors are never fatal: the engine retries them and, on
/// exhaustion, reports them to diagnostics and prunes the subtree.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Result type alias for linkharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl_seeds, crawl_seeds_with_fetcher, CrawlEngine, CrawlResult, Link};
pub use crawler::{AggregateReport, Fetch, HttpFetcher};
pub use diagnostics::{DiagnosticsSink, TracingSink};
pub use crate::url::{file_suffix, netloc};
