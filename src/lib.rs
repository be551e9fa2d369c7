//! Vitrine: a paginated storefront catalog crawler
//!
//! This crate walks the catalog pages of configured online stores, follows
//! every product link it finds, extracts title, price and image from each
//! product page, and writes one CSV file per store.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Vitrine operations
#[derive(Debug, Error)]
pub enum VitrineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Product container #{index} on {page_url} has no anchor")]
    MissingAnchor { page_url: String, index: usize },

    #[error("Anchor in product container #{index} on {page_url} has no href")]
    MissingHref { page_url: String, index: usize },

    #[error("Invalid product link '{href}': {message}")]
    InvalidLink { href: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Concurrency limiter closed")]
    LimiterClosed(#[from] tokio::sync::AcquireError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for Vitrine operations
pub type Result<T> = std::result::Result<T, VitrineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, StoreConfig};
pub use crawler::{run_crawl, StoreCrawler};
pub use output::{CrawlSummary, ProductRecord};
