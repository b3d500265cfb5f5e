use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig, ProxyConfig};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
///
/// Runs before any network activity; every crawl-time setting is checked here.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    if let Some(proxy) = &config.proxy {
        validate_proxy_config(proxy)?;
    }
    validate_output_config(&config.output)?;

    if config.crawler.shutdown_grace_ms < config.http.timeout_ms {
        return Err(ConfigError::Validation(format!(
            "shutdown_grace_ms ({}ms) must be >= timeout_ms ({}ms)",
            config.crawler.shutdown_grace_ms, config.http.timeout_ms
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;

    if config.thread_pool_size < 1 || config.thread_pool_size > 64 {
        return Err(ConfigError::Validation(format!(
            "thread_pool_size must be between 1 and 64, got {}",
            config.thread_pool_size
        )));
    }

    for pattern in &config.package_filters {
        validate_package_filter(pattern)?;
    }

    if let Some(entry_points) = &config.entry_points {
        if entry_points.is_empty() {
            return Err(ConfigError::Validation(
                "entry_points cannot be an empty list".to_string(),
            ));
        }
        if entry_points.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "entry_points cannot contain empty names".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the documentation root URL
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    if base_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "base_url cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            base_url
        )));
    }

    Ok(())
}

/// Checks that a package filter compiles as a regular expression
fn validate_package_filter(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Package filter cannot be empty".to_string(),
        ));
    }

    Regex::new(pattern)
        .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))?;

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "timeout_ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    Ok(())
}

/// Validates proxy configuration
fn validate_proxy_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    if config.host.trim().is_empty() {
        return Err(ConfigError::Validation(
            "proxy host cannot be empty".to_string(),
        ));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation(
            "proxy port must be non-zero".to_string(),
        ));
    }

    if config.password.is_some() && config.username.is_none() {
        return Err(ConfigError::Validation(
            "proxy password requires a username".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
