use super::{CacheError, CacheResult, CacheStats, PutOutcome, TypeCache};
use crate::model::TypeDoc;
use dashmap::DashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const RECORD_EXTENSION: &str = "json";

/// One JSON file per type under a directory
///
/// The directory is scanned once at open; after that [`TypeCache::is_cached`]
/// only consults the in-memory index.
#[derive(Debug)]
pub struct FileCache {
    directory: PathBuf,
    index: DashSet<String>,
    temp_counter: AtomicU64,
}

impl FileCache {
    /// Opens (creating if needed) a cache directory and indexes its records
    pub fn open(directory: impl Into<PathBuf>) -> CacheResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| CacheError::Io {
            path: directory.clone(),
            source,
        })?;

        let index = DashSet::new();
        let entries = fs::read_dir(&directory).map_err(|source| CacheError::Io {
            path: directory.clone(),
            source,
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    index.insert(stem.to_string());
                }
            }
        }

        tracing::debug!(
            "Indexed {} cached types in {}",
            index.len(),
            directory.display()
        );

        Ok(Self {
            directory,
            index,
            temp_counter: AtomicU64::new(0),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", key, RECORD_EXTENSION))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let n = self.temp_counter.fetch_add(1, Ordering::Relaxed);
        self.directory
            .join(format!(".{}.{}.{}.tmp", key, std::process::id(), n))
    }

    /// Writes through a temporary file hard-linked into place
    ///
    /// Linking fails if the record already exists, so a record on disk is
    /// never replaced.
    fn write_record(&self, key: &str, content: &[u8]) -> CacheResult<PutOutcome> {
        let temp = self.temp_path(key);
        fs::write(&temp, content).map_err(|source| CacheError::Io {
            path: temp.clone(),
            source,
        })?;

        let target = self.record_path(key);
        let linked = fs::hard_link(&temp, &target);
        let _ = fs::remove_file(&temp);

        match linked {
            Ok(()) => Ok(PutOutcome::Written),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(PutOutcome::AlreadyPresent),
            Err(source) => Err(CacheError::Io {
                path: target,
                source,
            }),
        }
    }

    /// Drops an unreadable record so the type can be fetched and cached again
    fn discard(&self, key: &str) {
        self.index.remove(key);
        let _ = fs::remove_file(self.record_path(key));
    }
}

/// Rejects keys that would escape the cache directory
fn validate_key(key: &str) -> CacheResult<()> {
    if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl TypeCache for FileCache {
    fn is_cached(&self, full_name: &str) -> bool {
        self.index.contains(full_name)
    }

    fn get(&self, full_name: &str) -> CacheResult<Option<TypeDoc>> {
        if !self.is_cached(full_name) {
            return Ok(None);
        }

        let path = self.record_path(full_name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            // claimed by a `put` that has not linked its file yet
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        match serde_json::from_str(&content) {
            Ok(doc) => Ok(Some(doc)),
            Err(source) => {
                self.discard(full_name);
                Err(CacheError::Record { path, source })
            }
        }
    }

    fn put(&self, doc: &TypeDoc) -> CacheResult<PutOutcome> {
        let key = doc.full_name();
        validate_key(&key)?;

        // claim the key; a concurrent or earlier writer wins
        if !self.index.insert(key.clone()) {
            return Ok(PutOutcome::AlreadyPresent);
        }

        let content = match serde_json::to_vec_pretty(doc) {
            Ok(content) => content,
            Err(source) => {
                self.index.remove(&key);
                return Err(CacheError::Record {
                    path: self.record_path(&key),
                    source,
                });
            }
        };

        match self.write_record(&key, &content) {
            Ok(outcome) => Ok(outcome),
            Err(first) => {
                tracing::debug!("Retrying cache write for {}: {}", key, first);
                self.write_record(&key, &content).map_err(|e| {
                    self.index.remove(&key);
                    e
                })
            }
        }
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            count: self.index.len(),
            location: Some(self.directory.clone()),
        }
    }
}
