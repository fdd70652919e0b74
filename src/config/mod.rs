//! Configuration module for linkharvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use linkharvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use depth: {}", config.crawler.depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AggregationConfig, Config, CrawlerConfig, ExportFormat, FetchConfig, FetchMode, FilterConfig,
    OutputConfig,
};

// Re-export parser and validation functions
pub use parser::{load_config, load_seeds_file};
pub use validation::{validate, validate_seeds};
