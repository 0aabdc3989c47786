//! Crawler module for walking a Filmow watched list
//!
//! This module contains the crawl-and-export flow, including:
//! - HTTP fetching with a fixed user agent and timeout
//! - Page count discovery from the pagination control
//! - Listing page parsing and detail page extraction
//! - The sequential walk that ties them together

mod coordinator;
mod detail;
mod fetcher;
mod listing;
mod pagination;

pub use coordinator::Coordinator;
pub use detail::fetch_movie;
pub use fetcher::{build_http_client, fetch_url, FetchedPage};
pub use listing::{parse_listing, parse_rating, ListingItem, ListingPage};
pub use pagination::{discover_last_page, last_page_from_html};

use crate::config::Config;
use crate::output::{export_csv, CrawlObserver, CrawlStatistics, TracingObserver};
use crate::record::RecordStore;
use crate::FilmowError;
use std::path::PathBuf;
use url::Url;

/// Outcome of a completed crawl-and-export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Normalized user handle
    pub user: String,
    /// CSV files written, in index order
    pub files: Vec<PathBuf>,
    /// Counters gathered by the observer
    pub statistics: CrawlStatistics,
}

/// Trims and lower-cases a user handle, rejecting ones that would break the URL
pub fn normalize_user(input: &str) -> Result<String, FilmowError> {
    let user = input.trim().to_lowercase();

    let valid = !user.is_empty()
        && user
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && user != "."
        && user != "..";

    if valid {
        Ok(user)
    } else {
        Err(FilmowError::InvalidUser(input.to_string()))
    }
}

/// Builds `<base>/usuario/<user>/filmes/ja-vi/`
pub fn listing_url(base_url: &Url, user: &str) -> Result<Url, FilmowError> {
    Ok(base_url.join(&format!("/usuario/{}/filmes/ja-vi/", user))?)
}

/// Runs a complete crawl and export for `user` with a tracing observer
///
/// See [`run_export_with`].
pub async fn run_export(config: &Config, user: &str) -> Result<ExportSummary, FilmowError> {
    let mut observer = TracingObserver::new();
    run_export_with(config, user, &mut observer).await
}

/// Runs a complete crawl and export for `user`
///
/// This is the main entry point. It will:
/// 1. Normalize the user handle
/// 2. Walk the watched list page by page
/// 3. Write the collected records as numbered CSV files
/// 4. Finish the observer
///
/// When the walk aborts on a listing failure, the records gathered from the
/// pages before it are still exported and the crawl error is returned
/// afterwards. An aborted run with nothing collected writes no files.
pub async fn run_export_with(
    config: &Config,
    user: &str,
    observer: &mut dyn CrawlObserver,
) -> Result<ExportSummary, FilmowError> {
    let user = normalize_user(user)?;
    let coordinator = Coordinator::new(config.site.clone())?;
    let listing = coordinator.listing_url(&user)?;

    let mut store = RecordStore::new();
    let outcome = coordinator.run(&listing, &mut store, observer).await;

    let mut files = Vec::new();
    if outcome.is_ok() || !store.is_empty() {
        if outcome.is_err() {
            tracing::warn!(
                "Crawl stopped early; exporting the {} movie(s) collected so far",
                store.len()
            );
        }

        files = export_csv(
            store.records(),
            &user,
            &config.export.output_dir,
            config.export.chunk_policy(),
        )?;
        observer.on_export_complete(&files);
    }

    let statistics = observer.finish();
    outcome?;

    Ok(ExportSummary {
        user,
        files,
        statistics,
    })
}
