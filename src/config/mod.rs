//! Configuration module for Vitrine
//!
//! This module holds the built-in store definitions and handles loading,
//! parsing, and validating optional TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use vitrine::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("stores.toml")).unwrap();
//! println!("Request timeout: {}s", config.crawler.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HeaderConfig, OutputConfig, StoreConfig, DEFAULT_ACCEPT,
    DEFAULT_ACCEPT_ENCODING, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

pub(crate) use validation::compile_selector;
