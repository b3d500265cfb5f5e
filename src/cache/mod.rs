//! Persistent cache of parsed type records
//!
//! Records are keyed by fully-qualified type name. The first record written
//! for a key is final: later writes for the same key are ignored, within one
//! run and across runs.

mod file;

pub use file::FileCache;

use crate::config::CacheConfig;
use crate::model::TypeDoc;
use std::path::PathBuf;
use thiserror::Error;

/// Cache-specific errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid cache record {path}: {source}")]
    Record {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

/// Result type for cache operations
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Outcome of a [`TypeCache::put`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was stored
    Written,
    /// A record for this key already exists and was kept
    AlreadyPresent,
    /// Caching is turned off
    Disabled,
}

/// Number of records and where they live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub count: usize,
    pub location: Option<PathBuf>,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(path) => write!(f, "{} cached types in {}", self.count, path.display()),
            None => write!(f, "cache disabled"),
        }
    }
}

/// Store for parsed type records shared by all crawl workers
pub trait TypeCache: Send + Sync {
    /// In-memory lookup; never touches the filesystem
    fn is_cached(&self, full_name: &str) -> bool;

    /// Loads a record; a missing or unreadable record is `Ok(None)`
    fn get(&self, full_name: &str) -> CacheResult<Option<TypeDoc>>;

    /// Stores a record unless one already exists for its key
    fn put(&self, doc: &TypeDoc) -> CacheResult<PutOutcome>;

    fn stats(&self) -> CacheStats;
}

/// Cache used when caching is switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCache;

impl TypeCache for DisabledCache {
    fn is_cached(&self, _full_name: &str) -> bool {
        false
    }

    fn get(&self, _full_name: &str) -> CacheResult<Option<TypeDoc>> {
        Ok(None)
    }

    fn put(&self, _doc: &TypeDoc) -> CacheResult<PutOutcome> {
        Ok(PutOutcome::Disabled)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            count: 0,
            location: None,
        }
    }
}

/// Opens the cache described by the configuration
///
/// A cache directory that cannot be opened is logged and replaced with a
/// disabled cache; the crawl proceeds without caching.
pub fn open_cache(config: &CacheConfig) -> Box<dyn TypeCache> {
    if !config.enabled {
        tracing::info!("Type cache disabled");
        return Box::new(DisabledCache);
    }

    match FileCache::open(&config.directory) {
        Ok(cache) => {
            tracing::info!("{}", cache.stats());
            Box::new(cache)
        }
        Err(e) => {
            tracing::warn!("Failed to open type cache, continuing without it: {}", e);
            Box::new(DisabledCache)
        }
    }
}
