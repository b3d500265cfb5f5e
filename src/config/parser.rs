use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
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
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be matched to the settings they used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[crawler]
base-url = "https://docs.example.com/api/"
thread-pool-size = 8
package-filters = ["com\\.acme\\..*"]
progress-interval-ms = 1000
shutdown-grace-ms = 90000
entry-points = ["allclasses.html", "index.html"]

[http]
user-agent = "TestCrawler/2.0"
timeout-ms = 15000

[proxy]
host = "proxy.local"
port = 3128
username = "alice"
password = "secret"

[cache]
enabled = false
directory = "/var/cache/javadoc"

[output]
path = "./out.json"
format = "aggregate"
mcp-compatible = false
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.base_url, "https://docs.example.com/api/");
        assert_eq!(config.crawler.thread_pool_size, 8);
        assert_eq!(config.crawler.package_filters, vec!["com\\.acme\\..*"]);
        assert_eq!(
            config.crawler.entry_points,
            Some(vec!["allclasses.html".to_string(), "index.html".to_string()])
        );
        assert_eq!(config.http.user_agent, "TestCrawler/2.0");
        assert_eq!(config.http.timeout_ms, 15000);

        let proxy = config.proxy.unwrap();
        assert_eq!(proxy.url(), "http://proxy.local:3128");
        assert_eq!(proxy.username.as_deref(), Some("alice"));

        assert!(!config.cache.enabled);
        assert_eq!(config.output.format, OutputFormat::Aggregate);
        assert!(!config.output.mcp_compatible);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config(
            r#"
[crawler]
base-url = "https://docs.example.com/api/"
"#,
        )
        .unwrap();

        assert_eq!(config.crawler.thread_pool_size, 5);
        assert_eq!(config.crawler.progress_interval_ms, 5000);
        assert_eq!(config.crawler.shutdown_grace_ms, 60000);
        assert!(config.crawler.package_filters.is_empty());
        assert!(config.crawler.entry_points.is_none());
        assert_eq!(config.http.user_agent, "JavaDocCrawler/1.0");
        assert_eq!(config.http.timeout_ms, 30000);
        assert!(config.proxy.is_none());
        assert!(config.cache.enabled);
        assert!(config.cache.directory.ends_with("javadoc-crawler-cache"));
        assert_eq!(config.output.format, OutputFormat::PerType);
        assert!(config.output.mcp_compatible);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/crawler.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_base_url_is_rejected() {
        let result = parse_config("[crawler]\nthread-pool-size = 3\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
base-url = "https://docs.example.com/api/"
thread-pool-size = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
