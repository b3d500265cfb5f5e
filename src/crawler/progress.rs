//! Crawl progress counters and reporting
//!
//! Workers bump the counters concurrently. A progress line is logged at most
//! once per interval; the summary is logged once at the end.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counter values at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub total: u64,
    pub processed: u64,
    pub skipped: u64,
    pub failed: u64,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    /// Pages that reached an outcome of any kind
    pub fn completed(&self) -> u64 {
        self.processed + self.skipped + self.failed
    }

    /// Processed pages as a percentage of the total, if the total is known
    pub fn success_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.processed as f64 / self.total as f64 * 100.0)
    }

    /// Processed pages per second
    pub fn rate(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if self.processed == 0 || seconds <= 0.0 {
            0.0
        } else {
            self.processed as f64 / seconds
        }
    }
}

/// Thread-safe progress tracker for one crawl
#[derive(Debug)]
pub struct ProgressTracker {
    total: AtomicU64,
    processed: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    started: Instant,
    interval_ms: u64,
    /// Milliseconds after `started` of the last progress line
    last_log_ms: AtomicU64,
}

impl ProgressTracker {
    pub fn new(interval: Duration) -> Self {
        Self {
            total: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            started: Instant::now(),
            interval_ms: interval.as_millis() as u64,
            last_log_ms: AtomicU64::new(0),
        }
    }

    pub fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
        tracing::info!("Total classes to process: {}", total);
    }

    pub fn add_to_total(&self, count: u64) {
        let total = self.total.fetch_add(count, Ordering::Relaxed) + count;
        tracing::debug!("Added {} classes to total. New total: {}", count, total);
    }

    pub fn increment_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
        self.log_if_due();
    }

    pub fn increment_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
        self.log_if_due();
    }

    pub fn increment_failed(&self) {
        self.increment_failed_by(1);
    }

    pub fn increment_failed_by(&self, count: u64) {
        if count == 0 {
            return;
        }
        self.failed.fetch_add(count, Ordering::Relaxed);
        self.log_if_due();
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total.load(Ordering::Relaxed),
            processed: self.processed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }

    /// Logs a progress line if the interval has passed since the last one
    ///
    /// When several workers race past the interval only the one that wins
    /// the exchange logs. Returns true if this call logged.
    pub fn log_if_due(&self) -> bool {
        let now = self.started.elapsed().as_millis() as u64;
        let last = self.last_log_ms.load(Ordering::Relaxed);
        if now.saturating_sub(last) < self.interval_ms {
            return false;
        }
        if self
            .last_log_ms
            .compare_exchange(last, now, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }
        self.log_progress();
        true
    }

    /// Logs a progress line unconditionally
    pub fn log_progress(&self) {
        let s = self.snapshot();
        match s.success_rate() {
            Some(percentage) => tracing::info!(
                "Progress: {}/{} ({:.1}%) processed, {} skipped, {} failed. Rate: {:.1} classes/sec",
                s.processed,
                s.total,
                percentage,
                s.skipped,
                s.failed,
                s.rate()
            ),
            None => tracing::info!(
                "Progress: {} processed, {} skipped, {} failed",
                s.processed,
                s.skipped,
                s.failed
            ),
        }
    }

    /// Logs the final summary and returns the counters it reported
    pub fn finish(&self) -> ProgressSnapshot {
        let s = self.snapshot();
        tracing::info!("=== Crawling Summary ===");
        tracing::info!("Total time: {:.2} seconds", s.elapsed.as_secs_f64());
        tracing::info!("Classes processed: {}", s.processed);
        tracing::info!("Classes skipped: {}", s.skipped);
        tracing::info!("Classes failed: {}", s.failed);
        if let Some(rate) = s.success_rate() {
            tracing::info!("Total classes found: {}", s.total);
            tracing::info!("Success rate: {:.1}%", rate);
        }
        tracing::info!("Average processing rate: {:.2} classes/second", s.rate());
        tracing::info!("======================");
        s
    }
}
