//! Configuration module for dm-scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file is the common case.
//!
//! # Example
//!
//! ```no_run
//! use dm_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("dm-scrape.toml")).unwrap();
//! println!("Render timeout: {:?}", config.scrape.timeout());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrowserSettings, Config, OutputConfig, ScrapeConfig, DEFAULT_ELEMENT_TAG,
    DEFAULT_MAX_COMMENTS, DEFAULT_MAX_RETRIES, DEFAULT_SITE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_URL_PATTERN,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
