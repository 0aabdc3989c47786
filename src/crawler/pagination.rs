//! Listing page count discovery

use crate::crawler::fetcher::fetch_url;
use crate::extract::selector;
use crate::FilmowError;
use reqwest::Client;
use scraper::Html;
use url::Url;

/// Highest page number linked from the pagination control, at least 1
///
/// Relative hrefs are resolved against `listing_url`. A missing control, or
/// one without parseable page links, means a single page.
pub fn last_page_from_html(html: &str, listing_url: &Url, page_param: &str) -> u32 {
    let document = Html::parse_document(html);

    let (Some(container_selector), Some(link_selector)) =
        (selector("div.pagination"), selector("a[href]"))
    else {
        return 1;
    };

    let Some(container) = document.select(&container_selector).next() else {
        return 1;
    };

    container
        .select(&link_selector)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| page_number(href, listing_url, page_param))
        .fold(1, u32::max)
}

fn page_number(href: &str, listing_url: &Url, page_param: &str) -> Option<u32> {
    let url = listing_url.join(href.trim()).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == page_param)
        .and_then(|(_, value)| value.parse::<u32>().ok())
}

/// Fetches the listing root and returns its page count
///
/// The response status is not inspected here; page 1 is fetched and checked
/// again by the walker. Transport failures propagate.
pub async fn discover_last_page(
    client: &Client,
    listing_url: &Url,
    page_param: &str,
) -> Result<u32, FilmowError> {
    let page = fetch_url(client, listing_url.as_str()).await?;
    Ok(last_page_from_html(&page.body, listing_url, page_param))
}
