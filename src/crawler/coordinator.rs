//! Crawl coordinator - listing walk orchestration
//!
//! The coordinator drives a whole crawl:
//! - Discovering the number of listing pages
//! - Fetching each listing page in order and classifying it
//! - Resolving every list item to its detail page
//! - Appending extracted records to the store
//!
//! Listing-level failures abort the walk. Detail-level failures only skip the
//! movie they belong to.

use crate::config::SiteConfig;
use crate::crawler::detail::fetch_movie;
use crate::crawler::listing::{parse_listing, ListingItem, ListingPage};
use crate::crawler::pagination::discover_last_page;
use crate::crawler::{build_http_client, fetch_url, listing_url};
use crate::extract::ExtractContext;
use crate::output::CrawlObserver;
use crate::record::{MovieRecord, RecordStore};
use crate::FilmowError;
use reqwest::Client;
use url::Url;

/// Main crawl coordinator structure
pub struct Coordinator {
    site: SiteConfig,
    client: Client,
    base_url: Url,
    context: ExtractContext,
}

impl Coordinator {
    /// Creates a coordinator with its own HTTP client and cookie jar
    pub fn new(site: SiteConfig) -> Result<Self, FilmowError> {
        let client = build_http_client(&site)?;
        let base_url = Url::parse(&site.base_url)?;
        let context = ExtractContext::from_site(&site);

        Ok(Self {
            site,
            client,
            base_url,
            context,
        })
    }

    /// Watched-list root URL for `user`
    pub fn listing_url(&self, user: &str) -> Result<Url, FilmowError> {
        listing_url(&self.base_url, user)
    }

    /// URL of listing page `page`
    pub fn page_url(&self, listing: &Url, page: u32) -> Url {
        let mut url = listing.clone();
        url.query_pairs_mut()
            .append_pair(&self.site.page_param, &page.to_string());
        url
    }

    /// Walks every listing page, appending records to `store`
    ///
    /// Records collected before a fatal error stay in `store`.
    pub async fn run(
        &self,
        listing: &Url,
        store: &mut RecordStore,
        observer: &mut dyn CrawlObserver,
    ) -> Result<(), FilmowError> {
        let last_page =
            match discover_last_page(&self.client, listing, &self.site.page_param).await {
                Ok(last_page) => last_page,
                Err(e) => {
                    observer.on_crawl_aborted(1, &e);
                    return Err(e);
                }
            };

        observer.on_crawl_start(listing, last_page);

        for page in 1..=last_page {
            if let Err(e) = self
                .walk_page(listing, page, last_page, store, observer)
                .await
            {
                observer.on_crawl_aborted(page, &e);
                return Err(e);
            }
        }

        Ok(())
    }

    async fn walk_page(
        &self,
        listing: &Url,
        page: u32,
        last_page: u32,
        store: &mut RecordStore,
        observer: &mut dyn CrawlObserver,
    ) -> Result<(), FilmowError> {
        let url = self.page_url(listing, page);
        let fetched = fetch_url(&self.client, url.as_str()).await?;

        if fetched.is_error_status() {
            return Err(FilmowError::ListingStatus {
                page,
                status: fetched.status_code,
            });
        }

        let (items, skipped) = match parse_listing(&fetched.body, &self.site.not_found_phrase) {
            ListingPage::NotFound => return Err(FilmowError::UserNotFound { page }),
            ListingPage::Empty => {
                observer.on_page_empty(page, last_page);
                return Ok(());
            }
            ListingPage::Items { items, skipped } => (items, skipped),
        };

        for _ in 0..skipped {
            observer.on_item_skipped(page);
        }

        let mut saved = 0;
        for item in &items {
            if let Some(record) = self.process_item(item, observer).await {
                store.push(record);
                saved += 1;
            }
        }

        observer.on_page_complete(page, last_page, items.len(), saved, store.len());
        Ok(())
    }

    async fn process_item(
        &self,
        item: &ListingItem,
        observer: &mut dyn CrawlObserver,
    ) -> Option<MovieRecord> {
        let detail_url = match self.base_url.join(&item.href) {
            Ok(url) => url,
            Err(e) => {
                observer.on_detail_failed(&item.href, &e.to_string());
                return None;
            }
        };

        tracing::debug!("Reading movie {}", detail_url);

        match fetch_movie(&self.client, &detail_url, item.rating.clone(), &self.context).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                observer.on_detail_failed(detail_url.as_str(), "no title found");
                None
            }
            Err(e) => {
                observer.on_detail_failed(detail_url.as_str(), &e.to_string());
                None
            }
        }
    }
}
