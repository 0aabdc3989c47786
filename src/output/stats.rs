//! Crawl statistics and the tracing-backed observer
//!
//! `TracingObserver` is the default `CrawlObserver`: it writes progress lines
//! through `tracing` and tallies counters for the closing summary.

use crate::output::traits::CrawlObserver;
use crate::FilmowError;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use url::Url;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of listing pages reported by the pagination control
    pub last_page: u32,

    /// Listing pages walked to completion (empty pages included)
    pub pages_walked: u32,

    /// Listing pages that had no movie list
    pub pages_empty: u32,

    /// List items with a detail link
    pub items_seen: usize,

    /// Records saved
    pub records_saved: usize,

    /// List items dropped for lacking a detail link
    pub items_skipped: usize,

    /// Detail pages that failed or had no title
    pub details_failed: usize,

    /// Page at which the crawl was aborted, if any
    pub aborted_at: Option<u32>,

    /// CSV files written
    pub files: Vec<PathBuf>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Share of linked items that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.items_seen == 0 {
            return 0.0;
        }
        (self.records_saved as f64 / self.items_seen as f64) * 100.0
    }
}

/// Observer that logs through `tracing` and accumulates statistics
#[derive(Debug)]
pub struct TracingObserver {
    stats: CrawlStatistics,
    started: Instant,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self {
            stats: CrawlStatistics::default(),
            started: Instant::now(),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlObserver for TracingObserver {
    fn on_crawl_start(&mut self, listing_url: &Url, last_page: u32) {
        self.stats.last_page = last_page;
        tracing::info!(
            "Starting import from {}: {} page(s) found",
            listing_url,
            last_page
        );
    }

    fn on_page_empty(&mut self, page: u32, last_page: u32) {
        self.stats.pages_walked += 1;
        self.stats.pages_empty += 1;
        tracing::info!("Page {}/{}: no movies found", page, last_page);
    }

    fn on_item_skipped(&mut self, page: u32) {
        self.stats.items_skipped += 1;
        tracing::debug!("Page {}: list item without a movie link", page);
    }

    fn on_detail_failed(&mut self, detail_url: &str, reason: &str) {
        self.stats.details_failed += 1;
        tracing::debug!("Skipping movie {}: {}", detail_url, reason);
    }

    fn on_page_complete(&mut self, page: u32, last_page: u32, seen: usize, saved: usize, total: usize) {
        self.stats.pages_walked += 1;
        self.stats.items_seen += seen;
        self.stats.records_saved += saved;
        tracing::info!(
            "Page {}/{} done: {} read, {} saved, {} total",
            page,
            last_page,
            seen,
            saved,
            total
        );
    }

    fn on_crawl_aborted(&mut self, page: u32, error: &FilmowError) {
        self.stats.aborted_at = Some(page);
        tracing::error!("Could not read page {} of the watched list: {}", page, error);
    }

    fn on_export_complete(&mut self, files: &[PathBuf]) {
        self.stats.files = files.to_vec();
        tracing::info!("Export complete: {} CSV file(s) written", files.len());
    }

    fn finish(&mut self) -> CrawlStatistics {
        self.stats.elapsed = self.started.elapsed();
        std::mem::take(&mut self.stats)
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Export Statistics ===\n");

    println!("Listing:");
    println!("  Pages walked: {} / {}", stats.pages_walked, stats.last_page);
    println!("  Empty pages: {}", stats.pages_empty);
    if let Some(page) = stats.aborted_at {
        println!("  Aborted at page: {}", page);
    }
    println!();

    println!("Movies:");
    println!("  Linked items: {}", stats.items_seen);
    println!("  Saved: {}", stats.records_saved);
    println!("  Items without link: {}", stats.items_skipped);
    println!("  Detail pages skipped: {}", stats.details_failed);
    println!();

    println!("Files ({}):", stats.files.len());
    for file in &stats.files {
        println!("  - {}", file.display());
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} movies saved) in {:.1}s",
        stats.success_rate(),
        stats.records_saved,
        stats.items_seen,
        stats.elapsed.as_secs_f64()
    );
}
