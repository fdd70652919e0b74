use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Main configuration structure for linkharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of link-hops to follow from each seed
    pub depth: u32,

    /// Total fetch attempts per URL (first success wins)
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Delay imposed after each fetch that descends further (milliseconds)
    #[serde(rename = "rate-limit-ms", default)]
    pub rate_limit_ms: u64,

    /// Number of seeds crawled concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// Per-fetch deadline (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// How pages are fetched: a direct request or a rendered one
    #[serde(rename = "fetch-mode", default)]
    pub fetch_mode: FetchMode,
}

/// Fetch strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Plain HTTP GET
    #[default]
    Static,
    /// Fetch through an injected rendering strategy (scripts executed)
    Rendered,
}

/// Link filter configuration
///
/// Empty sets disable the corresponding filter.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Keep only links ending with one of these suffixes (e.g. ".pdf")
    #[serde(rename = "include-types", default)]
    pub include_types: Vec<String>,

    /// Drop links ending with one of these suffixes
    #[serde(rename = "exclude-types", default)]
    pub exclude_types: Vec<String>,

    /// Keep only links containing at least one of these keywords
    #[serde(rename = "include-keywords", default)]
    pub include_keywords: Vec<String>,

    /// Drop links containing any of these keywords
    #[serde(rename = "exclude-keywords", default)]
    pub exclude_keywords: Vec<String>,

    /// Match keywords case-sensitively
    #[serde(rename = "case-sensitive", default)]
    pub case_sensitive: bool,

    /// Keep links whose host differs from the page they were found on
    #[serde(rename = "include-external", default = "default_true")]
    pub include_external: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_types: Vec::new(),
            exclude_types: Vec::new(),
            include_keywords: Vec::new(),
            exclude_keywords: Vec::new(),
            case_sensitive: false,
            include_external: true,
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchConfig {
    /// Custom User-Agent header
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,

    /// Basic-auth username
    pub username: Option<String>,

    /// Basic-auth password
    pub password: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Result aggregation configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregationConfig {
    /// Bucket links under the seed's domain instead of the seed URL
    #[serde(rename = "group-by-domain", default)]
    pub group_by_domain: bool,

    /// Reduce each seed's contribution to distinct links before bucketing
    #[serde(rename = "unique-links", default)]
    pub unique_links: bool,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the export file (flat file or archive)
    pub path: String,

    /// Flat export format
    #[serde(default)]
    pub format: ExportFormat,

    /// Write a ZIP archive with one CSV per bucket instead of a flat file
    #[serde(rename = "separate-files", default)]
    pub separate_files: bool,

    /// Print per-bucket link counts after the run
    #[serde(rename = "show-counts", default)]
    pub show_counts: bool,
}

/// Flat export format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Txt,
}

impl CrawlerConfig {
    /// Rate-limit delay as a Duration (zero disables it)
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Per-fetch deadline as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn default_retries() -> u32 {
    1
}

fn default_concurrency() -> u32 {
    4
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
