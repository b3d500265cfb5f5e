//! Output module for writing crawl results as JSON
//!
//! This module handles:
//! - One record per type, optionally with search metadata
//! - One aggregate record with metadata and every package

mod json;
mod traits;

pub use json::{AggregateWriter, PerTypeWriter, AGGREGATE_FILE_NAME, CRAWL_SOURCE};
pub use traits::{OutputError, OutputResult, OutputWriter, WriteSummary};

use crate::config::{OutputConfig, OutputFormat};

/// Builds the writer selected by the output configuration
pub fn writer_for(config: &OutputConfig) -> Box<dyn OutputWriter> {
    match config.format {
        OutputFormat::PerType => Box::new(PerTypeWriter::new(&config.path, config.mcp_compatible)),
        OutputFormat::Aggregate => Box::new(AggregateWriter::new(&config.path)),
    }
}
