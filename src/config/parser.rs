use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use linkharvest::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Crawl depth: {}", config.crawler.depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Reads seed URLs from a bulk file
///
/// Accepts line-delimited text or simple CSV: each non-empty line
/// contributes its first comma-separated field, trimmed. A leading `Links`
/// header line is skipped so a previously exported flat CSV can be fed
/// straight back in.
///
/// # Arguments
///
/// * `path` - Path to the seeds file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Seed URLs in file order
/// * `Err(ConfigError)` - Failed to read the file
pub fn load_seeds_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut seeds = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let field = line.split(',').next().unwrap_or("").trim();
        if field.is_empty() {
            continue;
        }
        if index == 0 && field.eq_ignore_ascii_case("links") {
            continue;
        }
        seeds.push(field.to_string());
    }

    Ok(seeds)
}
