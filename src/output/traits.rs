//! Crawl observer trait
//!
//! The walker reports progress through a `CrawlObserver` handed to it for the
//! duration of one run. The observer decides how events are surfaced and
//! turns them into a statistics summary when the run is finished.

use crate::output::stats::CrawlStatistics;
use crate::FilmowError;
use std::path::PathBuf;
use url::Url;

/// Receives progress events from one crawl-and-export run
pub trait CrawlObserver {
    /// Called once the page count is known, before any listing page is walked
    fn on_crawl_start(&mut self, listing_url: &Url, last_page: u32);

    /// A listing page had no movie list container
    fn on_page_empty(&mut self, page: u32, last_page: u32);

    /// A list item carried no detail link
    fn on_item_skipped(&mut self, page: u32);

    /// A detail page could not be fetched or yielded no title
    fn on_detail_failed(&mut self, detail_url: &str, reason: &str);

    /// A listing page was fully processed
    ///
    /// * `seen` - items with a detail link
    /// * `saved` - items that produced a record
    /// * `total` - records collected so far in this run
    fn on_page_complete(&mut self, page: u32, last_page: u32, seen: usize, saved: usize, total: usize);

    /// The crawl stopped on a listing-level failure
    fn on_crawl_aborted(&mut self, page: u32, error: &FilmowError);

    /// CSV files were written
    fn on_export_complete(&mut self, files: &[PathBuf]);

    /// Ends the run and returns what was observed
    fn finish(&mut self) -> CrawlStatistics;
}
