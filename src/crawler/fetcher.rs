//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with user agent, timeout and optional proxy
//! - GET requests for entry, package and type pages
//! - Error classification into status, timeout and network failures

use crate::config::{HttpConfig, ProxyConfig};
use crate::{DocCrawlError, Result};
use reqwest::{redirect::Policy, Client, Proxy};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Request never produced a usable response (timeout, DNS, TLS, refused)
    NetworkError {
        /// The underlying client error
        source: reqwest::Error,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    /// Converts into the page body, or the error describing the failure
    pub fn into_body(self, url: &Url) -> Result<String> {
        match self {
            FetchResult::Success { body, .. } => Ok(body),
            FetchResult::HttpError { status_code } => Err(DocCrawlError::Status {
                url: url.to_string(),
                status: status_code,
            }),
            FetchResult::NetworkError { source } if source.is_timeout() => {
                Err(DocCrawlError::Timeout {
                    url: url.to_string(),
                })
            }
            FetchResult::NetworkError { source } => Err(DocCrawlError::Http {
                url: url.to_string(),
                source,
            }),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `http` - User agent and per-request timeout
/// * `proxy` - Optional proxy, with basic auth if a username is set
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client or parse the proxy address
///
/// # Example
///
/// ```no_run
/// use javadoc_crawler::config::HttpConfig;
/// use javadoc_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    http: &HttpConfig,
    proxy: Option<&ProxyConfig>,
) -> std::result::Result<Client, reqwest::Error> {
    let timeout = Duration::from_millis(http.timeout_ms);

    let mut builder = Client::builder()
        .user_agent(http.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = proxy {
        let mut configured = Proxy::all(proxy.url())?;
        if let Some(username) = &proxy.username {
            configured = configured.basic_auth(username, proxy.password.as_deref().unwrap_or(""));
        }
        builder = builder.proxy(configured);
    }

    builder.build()
}

/// Fetches a URL and classifies the outcome
///
/// No retries: the caller decides whether a failure means "try the next
/// candidate" or "count this page as failed".
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(source) => return FetchResult::NetworkError { source },
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(source) => FetchResult::NetworkError { source },
    }
}

/// Fetches a page body, turning every failure into an error
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    let result = fetch_url(client, url).await;
    match &result {
        FetchResult::Success { .. } => tracing::debug!("Fetched {}", url),
        FetchResult::HttpError { status_code } => {
            tracing::debug!("HTTP {} for {}", status_code, url)
        }
        FetchResult::NetworkError { source } => tracing::debug!("Fetch of {} failed: {}", url, source),
    }
    result.into_body(url)
}
