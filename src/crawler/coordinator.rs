//! Crawler coordinator - main crawl orchestration logic
//!
//! One call to [`Coordinator::crawl`] runs the whole batch:
//! - Discover an entry page under the base URL
//! - Extract the type-page URL set, probing package pages if it is empty
//! - Fetch, parse and cache every type page on a bounded worker pool
//! - Group the results by package and sort them
//!
//! The cache, progress counters, visited set and grouping live only for the
//! duration of one call.

use crate::cache::{open_cache, TypeCache};
use crate::config::{validate, Config};
use crate::crawler::discovery::{EntryPointDiscovery, EntryPointResult};
use crate::crawler::extractor::UrlExtractor;
use crate::crawler::page_parser::PageParser;
use crate::crawler::progress::{ProgressSnapshot, ProgressTracker};
use crate::crawler::{build_http_client, fetch_page};
use crate::model::{PackageDoc, PackageGrouping, TypeDoc};
use crate::state::{CrawlPhase, PhaseTracker};
use crate::url::{normalize_base_url, type_location, PackageFilter, TypeLocation};
use crate::{DocCrawlError, Result};
use dashmap::DashSet;
use reqwest::Client;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Outcome of one crawl
#[derive(Debug)]
pub struct CrawlResult {
    /// Packages sorted by name, types sorted by name within each
    pub packages: Vec<PackageDoc>,
    pub stats: ProgressSnapshot,
    /// The accepted entry page, `None` when discovery failed
    pub entry_point: Option<EntryPointResult>,
    pub phase: CrawlPhase,
}

impl CrawlResult {
    fn empty(stats: ProgressSnapshot, phase: CrawlPhase) -> Self {
        Self {
            packages: Vec::new(),
            stats,
            entry_point: None,
            phase,
        }
    }

    pub fn type_count(&self) -> usize {
        self.packages.iter().map(|p| p.types.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Type names as `package.Name`, in output order
    pub fn full_names(&self) -> Vec<String> {
        self.packages
            .iter()
            .flat_map(|p| p.types.iter().map(TypeDoc::full_name))
            .collect()
    }
}

/// State shared by the workers of one crawl
struct Workers {
    client: Client,
    parser: Arc<PageParser>,
    cache: Arc<dyn TypeCache>,
    progress: Arc<ProgressTracker>,
    visited: DashSet<Url>,
    grouping: PackageGrouping,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    filter: PackageFilter,
    parser: Arc<PageParser>,
    discovery: EntryPointDiscovery,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Configuration is valid and the client is built
    /// * `Err(DocCrawlError)` - Invalid configuration; nothing was fetched
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let client = build_http_client(&config.http, config.proxy.as_ref()).map_err(|source| {
            DocCrawlError::Http {
                url: config.crawler.base_url.clone(),
                source,
            }
        })?;
        let filter = PackageFilter::new(&config.crawler.package_filters)?;
        let parser = Arc::new(PageParser::standard()?);
        let discovery = EntryPointDiscovery::from_config(config.crawler.entry_points.as_deref());

        tracing::debug!(
            "Coordinator ready: {} workers, dialects {:?}",
            config.crawler.thread_pool_size,
            parser.registry().names()
        );

        Ok(Self {
            config: Arc::new(config),
            client,
            filter,
            parser,
            discovery,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn discovery(&self) -> &EntryPointDiscovery {
        &self.discovery
    }

    /// Crawls the configured base URL
    pub async fn run(&self) -> Result<CrawlResult> {
        let base_url = self.config.crawler.base_url.clone();
        self.crawl(&base_url).await
    }

    /// Crawls the documentation site rooted at `base_url`
    ///
    /// Only an unusable base URL is an error. A site without a usable entry
    /// page yields an empty result in phase [`CrawlPhase::Failed`]; pages
    /// that fail to load are counted and skipped.
    pub async fn crawl(&self, base_url: &str) -> Result<CrawlResult> {
        let base_url = normalize_base_url(base_url)?;
        tracing::info!("Starting crawl of Javadoc website: {}", base_url);

        let mut phase = PhaseTracker::new();
        let progress = Arc::new(ProgressTracker::new(Duration::from_millis(
            self.config.crawler.progress_interval_ms,
        )));
        let extractor = UrlExtractor::new(base_url.clone(), self.filter.clone())?;

        phase.advance(CrawlPhase::Discovering)?;
        let entry_point = match self.discovery.discover(&self.client, &base_url, &extractor).await {
            Ok(entry_point) => entry_point,
            Err(e) => {
                tracing::error!("{}", e);
                phase.advance(CrawlPhase::Failed)?;
                let stats = progress.finish();
                return Ok(CrawlResult::empty(stats, phase.current()));
            }
        };

        phase.advance(CrawlPhase::ExtractingUrls)?;
        let mut urls = extractor.extract_from_source(&entry_point.source, &entry_point.url);
        tracing::info!(
            "Extracted {} class URLs from entry point: {}",
            urls.len(),
            entry_point.candidate.name
        );
        if urls.is_empty() {
            tracing::warn!("No class URLs found");
            urls = self.probe_packages(&extractor).await;
        }

        let workers = Arc::new(Workers {
            client: self.client.clone(),
            parser: self.parser.clone(),
            cache: Arc::from(open_cache(&self.config.cache)),
            progress: progress.clone(),
            visited: DashSet::new(),
            grouping: PackageGrouping::new(),
        });

        if urls.is_empty() {
            phase.advance(CrawlPhase::Aggregating)?;
        } else {
            progress.set_total(urls.len() as u64);
            phase.advance(CrawlPhase::Dispatching)?;
            self.dispatch(&workers, &base_url, urls).await;
            phase.advance(CrawlPhase::Aggregating)?;
        }

        let stats = progress.finish();
        let cache_stats = workers.cache.stats();
        let packages = match Arc::try_unwrap(workers) {
            Ok(workers) => workers.grouping.into_sorted(),
            Err(shared) => shared.grouping.to_sorted(),
        };

        tracing::info!(
            "Crawling completed. Found {} packages with {} classes",
            packages.len(),
            stats.processed
        );
        if cache_stats.location.is_some() {
            tracing::info!("{}", cache_stats);
        }

        phase.advance(CrawlPhase::Done)?;
        Ok(CrawlResult {
            packages,
            stats,
            entry_point: Some(entry_point),
            phase: phase.current(),
        })
    }

    /// Looks for type links on the package index page of each filter
    async fn probe_packages(&self, extractor: &UrlExtractor) -> BTreeSet<Url> {
        let mut urls = BTreeSet::new();
        let paths = self.filter.package_paths();
        if paths.is_empty() {
            return urls;
        }

        tracing::info!("Attempting direct package discovery...");
        for path in paths {
            let page_url = match extractor
                .base_url()
                .join(&format!("{}/package-summary.html", path))
            {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Skipping package path {}: {}", path, e);
                    continue;
                }
            };

            tracing::info!("Trying direct package access: {}", page_url);
            match fetch_page(&self.client, &page_url).await {
                Ok(source) => {
                    let found = extractor.extract_from_source(&source, &page_url);
                    if !found.is_empty() {
                        tracing::info!("Found {} classes in package {}", found.len(), path.replace('/', "."));
                        urls.extend(found);
                    }
                }
                Err(e) => tracing::debug!("Failed to access package directly: {} - {}", page_url, e),
            }
        }
        urls
    }

    /// Runs every URL through the worker pool and waits for the results
    ///
    /// If no task completes within the grace period the remaining ones are
    /// aborted and counted as failed.
    async fn dispatch(&self, workers: &Arc<Workers>, base_url: &Url, urls: BTreeSet<Url>) {
        let pool_size = self.config.crawler.thread_pool_size;
        let grace = Duration::from_millis(self.config.crawler.shutdown_grace_ms);
        let semaphore = Arc::new(Semaphore::new(pool_size));
        let mut tasks = JoinSet::new();

        tracing::info!(
            "Starting concurrent crawling of {} classes with {} threads",
            urls.len(),
            pool_size
        );

        for url in urls {
            let location = match type_location(&url, base_url) {
                Ok(location) => location,
                Err(e) => {
                    tracing::warn!("Failed to crawl class: {} - {}", url, e);
                    workers.progress.increment_failed();
                    continue;
                }
            };
            let workers = workers.clone();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    workers.progress.increment_failed();
                    return;
                };
                crawl_type(&workers, location).await;
            });
        }

        loop {
            match tokio::time::timeout(grace, tasks.join_next()).await {
                Ok(Some(Ok(()))) => {}
                Ok(Some(Err(e))) => {
                    tracing::warn!("Failed to get crawl result: {}", e);
                    workers.progress.increment_failed();
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        "No class finished within {:?}; aborting {} remaining",
                        grace,
                        tasks.len()
                    );
                    tasks.abort_all();
                    let mut aborted = 0;
                    while let Some(result) = tasks.join_next().await {
                        if result.is_err() {
                            aborted += 1;
                        }
                    }
                    workers.progress.increment_failed_by(aborted);
                    break;
                }
            }
        }
    }
}

/// Fetches, parses and caches one type page, recording the outcome
async fn crawl_type(workers: &Workers, location: TypeLocation) {
    if !workers.visited.insert(location.url.clone()) {
        workers.progress.increment_skipped();
        return;
    }

    let full_name = location.full_name();
    if workers.cache.is_cached(&full_name) {
        let cache = workers.cache.clone();
        let key = full_name.clone();
        match tokio::task::spawn_blocking(move || cache.get(&key)).await {
            Ok(Ok(Some(doc))) => {
                tracing::debug!("Using cached record for: {}", full_name);
                workers.grouping.insert(doc);
                workers.progress.increment_skipped();
                return;
            }
            Ok(Ok(None)) => {}
            Ok(Err(e)) => tracing::warn!("Ignoring cached record for {}: {}", full_name, e),
            Err(e) => tracing::warn!("Cache lookup for {} did not finish: {}", full_name, e),
        }
    }

    match workers.parser.fetch_and_parse(&workers.client, &location).await {
        Ok(doc) => {
            store(&workers.cache, doc.clone()).await;
            workers.grouping.insert(doc);
            workers.progress.increment_processed();
        }
        Err(e) => {
            tracing::warn!("Failed to crawl class: {} - {}", location.url, e);
            workers.progress.increment_failed();
        }
    }
}

/// Writes a record to the cache off the async worker threads
async fn store(cache: &Arc<dyn TypeCache>, doc: TypeDoc) {
    let cache = cache.clone();
    let full_name = doc.full_name();
    match tokio::task::spawn_blocking(move || cache.put(&doc)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::warn!("Failed to cache {}: {}", full_name, e),
        Err(e) => tracing::warn!("Cache write for {} did not finish: {}", full_name, e),
    }
}
