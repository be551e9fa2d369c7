use crate::config::types::{Config, CrawlerConfig, HeaderConfig, OutputConfig, StoreConfig};
use crate::ConfigError;
use reqwest::header::HeaderValue;
use scraper::Selector;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_header_config(&config.headers)?;
    validate_output_config(&config.output)?;
    validate_stores(&config.stores)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.max_redirects > 50 {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= 50, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates that every header can be sent as-is
fn validate_header_config(config: &HeaderConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("accept", &config.accept),
        ("accept-encoding", &config.accept_encoding),
        ("accept-language", &config.accept_language),
        ("user-agent", &config.user_agent),
    ] {
        if HeaderValue::from_str(value).is_err() {
            return Err(ConfigError::Validation(format!(
                "header '{}' has an invalid value: '{}'",
                name, value
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates store entries
fn validate_stores(stores: &[StoreConfig]) -> Result<(), ConfigError> {
    if stores.is_empty() {
        return Err(ConfigError::Validation(
            "at least one store must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for store in stores {
        validate_identifier(&store.identifier)?;

        if !seen.insert(store.identifier.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store identifier '{}'",
                store.identifier
            )));
        }

        validate_base_url(&store.base_url)?;

        for selector in [
            &store.products_selector,
            &store.title_selector,
            &store.price_selector,
            &store.image_selector,
        ] {
            validate_selector(selector)?;
        }
    }

    Ok(())
}

/// Identifiers become file names, so keep them to a portable alphabet
fn validate_identifier(identifier: &str) -> Result<(), ConfigError> {
    if identifier.is_empty() {
        return Err(ConfigError::Validation(
            "store identifier cannot be empty".to_string(),
        ));
    }

    if !identifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "store identifier must contain only ASCII alphanumerics, '-' and '_', got '{}'",
            identifier
        )));
    }

    Ok(())
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    // Page 1 stands in for the appended page number
    let url = Url::parse(&format!("{}1", base_url))
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base URL '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' must use HTTP or HTTPS",
            base_url
        )));
    }

    Ok(())
}

/// Checks that a CSS selector compiles
fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    compile_selector(selector).map(|_| ())
}

/// Compiles a CSS selector, mapping failures into a config error
pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector {
            selector: selector.to_string(),
            message: "selector cannot be empty".to_string(),
        });
    }

    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}
