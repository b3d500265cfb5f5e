//! Integration tests for the crawler
//!
//! These tests use wiremock to serve small Javadoc sites and run the full
//! crawl cycle end-to-end.

mod common;
mod crawl_tests;
mod discovery_tests;
