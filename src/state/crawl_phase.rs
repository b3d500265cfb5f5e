//! Phases of one crawl invocation
//!
//! ```text
//! Start -> Discovering -> ExtractingUrls -> Dispatching -> Aggregating -> Done
//!                |               |
//!                v               +------------------------> Aggregating
//!              Failed
//! ```
use crate::{DocCrawlError, Result};
use std::fmt;

/// Represents the current phase of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Nothing has happened yet
    Start,

    /// Trying entry point candidates
    Discovering,

    /// Collecting type page URLs from the entry page (and package fallbacks)
    ExtractingUrls,

    /// Type pages are being fetched by the worker pool
    Dispatching,

    /// Sorting the package grouping
    Aggregating,

    // ===== Terminal States =====
    /// The crawl ran to completion, possibly with zero types
    Done,

    /// No entry point candidate yielded a usable page
    Failed,
}

impl CrawlPhase {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the transition is part of the phase graph
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;
        matches!(
            (*self, next),
            (Start, Discovering)
                | (Discovering, ExtractingUrls)
                | (Discovering, Failed)
                | (ExtractingUrls, Dispatching)
                | (ExtractingUrls, Aggregating)
                | (Dispatching, Aggregating)
                | (Aggregating, Done)
        )
    }

    /// Returns the lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Discovering => "discovering",
            Self::ExtractingUrls => "extracting-urls",
            Self::Dispatching => "dispatching",
            Self::Aggregating => "aggregating",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current phase of one crawl, advanced only along valid transitions
#[derive(Debug)]
pub struct PhaseTracker {
    current: CrawlPhase,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self {
            current: CrawlPhase::Start,
        }
    }
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CrawlPhase {
        self.current
    }

    /// Moves to `next`, or fails with [`DocCrawlError::InvalidTransition`]
    pub fn advance(&mut self, next: CrawlPhase) -> Result<()> {
        if !self.current.can_transition_to(next) {
            return Err(DocCrawlError::InvalidTransition {
                from: self.current,
                to: next,
            });
        }
        tracing::debug!("Crawl phase: {} -> {}", self.current, next);
        self.current = next;
        Ok(())
    }
}
