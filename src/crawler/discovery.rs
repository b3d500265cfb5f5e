//! Entry point discovery
//!
//! Documentation generators have named their index pages differently over
//! the years. Discovery tries a ranked list of candidate pages under the
//! base URL and accepts the first one that actually lists type pages; an
//! HTTP 200 alone is not enough.

use super::extractor::UrlExtractor;
use super::fetcher::fetch_url;
use super::FetchResult;
use reqwest::Client;
use scraper::Html;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Conceptual rank of an entry point candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPointGroup {
    /// An index listing every type
    AllTypes,
    /// An overview page, usually listing packages and sometimes types
    Overview,
    /// Plain package listings
    LastResort,
    /// Candidates named in the configuration
    Configured,
}

impl EntryPointGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllTypes => "all-types",
            Self::Overview => "overview",
            Self::LastResort => "last-resort",
            Self::Configured => "configured",
        }
    }
}

impl fmt::Display for EntryPointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One relative page name tried during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointCandidate {
    pub name: String,
    pub group: EntryPointGroup,
}

impl EntryPointCandidate {
    pub fn new(name: impl Into<String>, group: EntryPointGroup) -> Self {
        Self {
            name: name.into(),
            group,
        }
    }
}

const ALL_TYPES_PAGES: &[&str] = &[
    "allclasses-frame.html",
    "allclasses.html",
    "allclasses-noframe.html",
    "allclasses-index.html",
];

const OVERVIEW_PAGES: &[&str] = &["overview-summary.html", "overview-frame.html", "index.html"];

const LAST_RESORT_PAGES: &[&str] = &["package-list", "element-list"];

/// The ranked list used when the configuration names no entry points
pub fn default_candidates() -> Vec<EntryPointCandidate> {
    let groups = [
        (EntryPointGroup::AllTypes, ALL_TYPES_PAGES),
        (EntryPointGroup::Overview, OVERVIEW_PAGES),
        (EntryPointGroup::LastResort, LAST_RESORT_PAGES),
    ];
    groups
        .into_iter()
        .flat_map(|(group, names)| {
            names
                .iter()
                .map(move |name| EntryPointCandidate::new(*name, group))
        })
        .collect()
}

/// Candidates from a configured list, in the given order
pub fn configured_candidates<S: AsRef<str>>(names: &[S]) -> Vec<EntryPointCandidate> {
    names
        .iter()
        .map(|name| EntryPointCandidate::new(name.as_ref(), EntryPointGroup::Configured))
        .collect()
}

/// The accepted entry page
#[derive(Debug, Clone)]
pub struct EntryPointResult {
    pub candidate: EntryPointCandidate,
    /// Absolute URL of the accepted page, after redirects
    pub url: Url,
    pub source: String,
}

impl EntryPointResult {
    pub fn group(&self) -> EntryPointGroup {
        self.candidate.group
    }

    /// Parses the page source
    pub fn document(&self) -> Html {
        Html::parse_document(&self.source)
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("No valid entry point found for: {base_url} ({attempted} candidates tried)")]
    Exhausted { base_url: Url, attempted: usize },
}

/// Tries candidates in order until one lists at least one type page
#[derive(Debug, Clone)]
pub struct EntryPointDiscovery {
    candidates: Vec<EntryPointCandidate>,
}

impl Default for EntryPointDiscovery {
    fn default() -> Self {
        Self::new(default_candidates())
    }
}

impl EntryPointDiscovery {
    pub fn new(candidates: Vec<EntryPointCandidate>) -> Self {
        Self { candidates }
    }

    /// Configured list if present, default ranking otherwise
    pub fn from_config(entry_points: Option<&[String]>) -> Self {
        match entry_points {
            Some(names) => Self::new(configured_candidates(names)),
            None => Self::default(),
        }
    }

    pub fn candidates(&self) -> &[EntryPointCandidate] {
        &self.candidates
    }

    /// Runs discovery against `base_url`
    ///
    /// Fetch failures and pages without type links move on to the next
    /// candidate. Once a page is accepted no further candidate is fetched.
    pub async fn discover(
        &self,
        client: &Client,
        base_url: &Url,
        extractor: &UrlExtractor,
    ) -> Result<EntryPointResult, DiscoveryError> {
        tracing::info!("Attempting to find valid entry point for: {}", base_url);

        let mut current_group = None;
        for candidate in &self.candidates {
            if current_group != Some(candidate.group) {
                if let Some(previous) = current_group {
                    tracing::warn!("No accessible {} entry points found", previous);
                }
                tracing::info!("Trying {} entry points...", candidate.group);
                current_group = Some(candidate.group);
            }

            let url = match base_url.join(&candidate.name) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Skipping entry point {}: {}", candidate.name, e);
                    continue;
                }
            };

            let (final_url, source) = match fetch_url(client, &url).await {
                FetchResult::Success {
                    final_url, body, ..
                } => (final_url, body),
                FetchResult::HttpError { status_code } => {
                    tracing::debug!("Entry point {} returned HTTP {}", url, status_code);
                    continue;
                }
                FetchResult::NetworkError { source } => {
                    tracing::debug!("Entry point {} failed: {}", url, source);
                    continue;
                }
            };

            if !extractor.accepts_source(&source) {
                tracing::debug!("Entry point {} lists no type pages", url);
                continue;
            }

            tracing::info!(
                "Successfully accessed {} entry point: {}",
                candidate.group,
                final_url
            );
            return Ok(EntryPointResult {
                candidate: candidate.clone(),
                url: final_url,
                source,
            });
        }

        if let Some(last) = current_group {
            tracing::warn!("No accessible {} entry points found", last);
        }
        Err(DiscoveryError::Exhausted {
            base_url: base_url.clone(),
            attempted: self.candidates.len(),
        })
    }
}
