//! Crawler module for Javadoc site traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeouts and optional proxy
//! - Entry point discovery and type-link extraction
//! - Type page parsing through the registered dialects
//! - Progress tracking and overall crawl coordination

mod coordinator;
pub mod discovery;
mod extractor;
mod fetcher;
mod page_parser;
mod progress;

pub use coordinator::{Coordinator, CrawlResult};
pub use discovery::{
    default_candidates, DiscoveryError, EntryPointCandidate, EntryPointDiscovery, EntryPointGroup,
    EntryPointResult,
};
pub use extractor::UrlExtractor;
pub use fetcher::{build_http_client, fetch_page, fetch_url, FetchResult};
pub use page_parser::PageParser;
pub use progress::{ProgressSnapshot, ProgressTracker};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration
/// 2. Build the HTTP client and dialect registry
/// 3. Discover an entry page and extract type URLs
/// 4. Fetch, parse and cache every type page
/// 5. Return the package-grouped result
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl ran; the result may be empty
/// * `Err(DocCrawlError)` - The configuration was rejected
pub async fn crawl(config: Config) -> Result<CrawlResult> {
    Coordinator::new(config)?.run().await
}
