//! Fetch strategies
//!
//! The engine fetches pages through the `Fetch` trait, so the transport is
//! a configuration choice rather than a branch in the traversal:
//! - `HttpFetcher` performs a direct GET with optional basic-auth
//!   credentials, custom headers, and a custom User-Agent
//! - a rendered strategy (scripts executed before the markup is read) can
//!   be injected by library callers through the same trait

use crate::config::{Config, FetchMode};
use crate::{ConfigError, FetchError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// User-Agent sent when the configuration does not override it
pub const DEFAULT_USER_AGENT: &str = concat!("linkharvest/", env!("CARGO_PKG_VERSION"));

/// A source of HTML for the crawl engine
///
/// Implementations return the page body for a URL or a `FetchError`; the
/// engine owns retrying and error reporting.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches one URL and returns its HTML body
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Direct HTTP GET fetcher
pub struct HttpFetcher {
    client: Client,
    username: Option<String>,
    password: Option<String>,
}

impl HttpFetcher {
    /// Builds an HTTP fetcher from the run configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The run configuration (fetch section and timeouts)
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Ready-to-use fetcher
    /// * `Err(HarvestError)` - Header map or client construction failed
    pub fn new(config: &Config) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.fetch.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                ConfigError::Validation(format!("invalid header name: '{}'", name))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                ConfigError::Validation(format!("invalid value for header '{}'", name))
            })?;
            headers.insert(name, value);
        }

        let user_agent = config
            .fetch
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(config.crawler.fetch_timeout())
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            username: config.fetch.username.clone(),
            password: config.fetch.password.clone(),
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self.client.get(url);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await.map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify(url, e))
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Builds the fetch strategy selected by the configuration
///
/// The bundled binary only ships the static HTTP strategy; selecting
/// `rendered` without injecting an implementation through
/// [`crate::crawler::crawl_seeds_with_fetcher`] is a configuration error,
/// surfaced before any fetch.
pub fn build_fetcher(config: &Config) -> crate::Result<Arc<dyn Fetch>> {
    match config.crawler.fetch_mode {
        FetchMode::Static => Ok(Arc::new(HttpFetcher::new(config)?)),
        FetchMode::Rendered => Err(ConfigError::Validation(
            "fetch-mode 'rendered' requires an injected rendering strategy; \
             call crawl_seeds_with_fetcher with one"
                .to_string(),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AggregationConfig, CrawlerConfig, ExportFormat, FetchConfig, FilterConfig, OutputConfig,
    };

    fn create_test_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                depth: 1,
                retries: 1,
                rate_limit_ms: 0,
                concurrency: 1,
                fetch_timeout_secs: 30,
                fetch_mode: FetchMode::Static,
            },
            filters: FilterConfig::default(),
            fetch: FetchConfig::default(),
            aggregation: AggregationConfig::default(),
            output: OutputConfig {
                path: "links.csv".to_string(),
                format: ExportFormat::Csv,
                separate_files: false,
                show_counts: false,
            },
            seeds: vec![],
        }
    }

    #[test]
    fn test_build_http_fetcher() {
        let config = create_test_config();
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[test]
    fn test_build_http_fetcher_with_headers() {
        let mut config = create_test_config();
        config
            .fetch
            .headers
            .insert("X-Custom".to_string(), "value".to_string());
        config.fetch.user_agent = Some("harvester/9.9".to_string());
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[test]
    fn test_build_fetcher_static_mode() {
        let config = create_test_config();
        assert!(build_fetcher(&config).is_ok());
    }

    #[test]
    fn test_build_fetcher_rendered_mode_rejected() {
        let mut config = create_test_config();
        config.crawler.fetch_mode = FetchMode::Rendered;
        let result = build_fetcher(&config);
        assert!(matches!(
            result,
            Err(crate::HarvestError::Config(ConfigError::Validation(_)))
        ));
    }
}
