//! Output writer traits and types
//!
//! This module defines the trait interface for output writers and the
//! errors they report.

use crate::model::PackageDoc;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize {name}: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What a writer produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Number of files written
    pub files: usize,
    /// Number of type records in those files
    pub types: usize,
    /// Directory or file that received the output
    pub location: PathBuf,
}

/// Trait for output writers
///
/// A writer serializes the sorted package grouping of one crawl.
pub trait OutputWriter {
    /// Writes every package
    ///
    /// # Arguments
    ///
    /// * `packages` - Packages sorted by name, types sorted within each
    /// * `base_url` - The documentation root the records came from
    fn write(&self, packages: &[PackageDoc], base_url: &str) -> OutputResult<WriteSummary>;
}
