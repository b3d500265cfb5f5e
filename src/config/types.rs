use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for the Javadoc crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Builds a configuration with every optional setting at its default
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            crawler: CrawlerConfig {
                base_url: base_url.into(),
                thread_pool_size: default_thread_pool_size(),
                package_filters: Vec::new(),
                progress_interval_ms: default_progress_interval_ms(),
                shutdown_grace_ms: default_shutdown_grace_ms(),
                entry_points: None,
            },
            http: HttpConfig::default(),
            proxy: None,
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Root URL of the documentation site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Number of type pages fetched concurrently
    #[serde(rename = "thread-pool-size", default = "default_thread_pool_size")]
    pub thread_pool_size: usize,

    /// Regular expressions matched against the whole inferred package name
    #[serde(rename = "package-filters", default)]
    pub package_filters: Vec<String>,

    /// Minimum time between two progress lines (milliseconds)
    #[serde(
        rename = "progress-interval-ms",
        default = "default_progress_interval_ms"
    )]
    pub progress_interval_ms: u64,

    /// How long to wait for in-flight pages once dispatch is done (milliseconds)
    #[serde(rename = "shutdown-grace-ms", default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,

    /// Replaces the default ranked list of entry point candidates
    #[serde(rename = "entry-points", default)]
    pub entry_points: Option<Vec<String>>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Optional HTTP proxy
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    pub host: String,

    #[serde(default = "default_proxy_port")]
    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Proxy address in `http://host:port` form
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Type cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_cache_directory")]
    pub directory: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: default_cache_directory(),
        }
    }
}

/// Shape of the written documentation records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One file per type, named by its fully-qualified name
    PerType,
    /// A single file with the metadata block and all packages
    Aggregate,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-type" => Ok(OutputFormat::PerType),
            "aggregate" => Ok(OutputFormat::Aggregate),
            other => Err(format!(
                "unknown output format '{}', expected 'per-type' or 'aggregate'",
                other
            )),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory for per-type records, or the file for the aggregate record
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    #[serde(default = "default_output_format")]
    pub format: OutputFormat,

    /// Adds counts, search keywords and an `mcpMetadata` block to per-type records
    #[serde(rename = "mcp-compatible", default = "default_true")]
    pub mcp_compatible: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: default_output_format(),
            mcp_compatible: true,
        }
    }
}

fn default_thread_pool_size() -> usize {
    5
}

fn default_progress_interval_ms() -> u64 {
    5_000
}

fn default_shutdown_grace_ms() -> u64 {
    60_000
}

fn default_user_agent() -> String {
    "JavaDocCrawler/1.0".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_proxy_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_cache_directory() -> PathBuf {
    std::env::temp_dir().join("javadoc-crawler-cache")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("./javadoc-json")
}

fn default_output_format() -> OutputFormat {
    OutputFormat::PerType
}
