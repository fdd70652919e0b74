use crate::config::types::{
    Config, CrawlerConfig, FetchConfig, FilterConfig, OutputConfig,
};
use crate::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

/// Upper bound on crawl depth; deeper crawls explode combinatorially on
/// real sites
const MAX_DEPTH: u32 = 10;

/// Validates the entire configuration
///
/// Seeds are validated separately via [`validate_seeds`] because the final
/// seed list may be assembled from several sources after loading.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_filter_config(&config.filters)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates and parses the merged seed list
///
/// Every seed must be an absolute http(s) URL with a host; the parsed URLs
/// are returned in input order.
pub fn validate_seeds(seeds: &[String]) -> Result<Vec<Url>, ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    let mut parsed = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "'{}': scheme must be http or https",
                seed
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!("'{}': missing host", seed)));
        }

        parsed.push(url);
    }

    Ok(parsed)
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.depth > MAX_DEPTH {
        return Err(ConfigError::Validation(format!(
            "depth must be <= {}, got {}",
            MAX_DEPTH, config.depth
        )));
    }

    if config.retries < 1 {
        return Err(ConfigError::Validation(format!(
            "retries must be >= 1, got {}",
            config.retries
        )));
    }

    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates filter configuration
///
/// Filter sets may be empty (the filter is then disabled), but individual
/// entries must not be blank.
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    validate_filter_entries("include-types", &config.include_types)?;
    validate_filter_entries("exclude-types", &config.exclude_types)?;
    validate_filter_entries("include-keywords", &config.include_keywords)?;
    validate_filter_entries("exclude-keywords", &config.exclude_keywords)?;
    Ok(())
}

fn validate_filter_entries(field: &str, entries: &[String]) -> Result<(), ConfigError> {
    for entry in entries {
        if entry.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} contains a blank entry",
                field
            )));
        }
    }
    Ok(())
}

/// Validates fetch configuration
///
/// Header names and values must be representable on the wire; rejecting
/// them here keeps the failure at startup instead of on the first request.
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if let Some(ua) = &config.user_agent {
        HeaderValue::from_str(ua).map_err(|_| {
            ConfigError::Validation(format!("user-agent is not a valid header value: '{}'", ua))
        })?;
    }

    for (name, value) in &config.headers {
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ConfigError::Validation(format!("invalid header name: '{}'", name))
        })?;
        HeaderValue::from_str(value).map_err(|_| {
            ConfigError::Validation(format!("invalid value for header '{}'", name))
        })?;
    }

    if config.password.is_some() && config.username.is_none() {
        return Err(ConfigError::Validation(
            "password set without a username".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
