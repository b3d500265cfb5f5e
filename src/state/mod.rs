//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: The phases one crawl moves through, with its transition table
//! - `PhaseTracker`: Holds the current phase and rejects invalid transitions

mod crawl_phase;

pub use crawl_phase::{CrawlPhase, PhaseTracker};
