//! Listing page parsing
//!
//! Extracts the movie list items of one `ja-vi` page together with the
//! user's star rating, and recognizes the site's "not found" page.

use crate::extract::{element_text, selector};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static RATING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)([0-4](?:[.,]5)?|5)(?:\D|$)").expect("hardcoded regex pattern is valid")
});

/// One entry of the watched list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    /// Detail page link as found in the markup (usually site-relative)
    pub href: String,
    /// Normalized star rating
    pub rating: Option<String>,
}

/// What a listing page turned out to contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPage {
    /// The heading says the page or user does not exist
    NotFound,
    /// No movie list container on the page
    Empty,
    /// Parsed list items, plus how many `li` entries had no detail link
    Items {
        items: Vec<ListingItem>,
        skipped: usize,
    },
}

/// Parses a listing page body
///
/// `not_found_phrase` is compared against the lower-cased text of the first
/// `<h1>`.
pub fn parse_listing(html: &str, not_found_phrase: &str) -> ListingPage {
    let document = Html::parse_document(html);

    if let Some(heading) = selector("h1").and_then(|s| document.select(&s).next()) {
        if element_text(&heading)
            .to_lowercase()
            .contains(&not_found_phrase.to_lowercase())
        {
            return ListingPage::NotFound;
        }
    }

    let (Some(list_selector), Some(item_selector), Some(link_selector), Some(star_selector)) = (
        selector("ul#movies-list"),
        selector("li"),
        selector("a.tip-movie"),
        selector("span.star-rating"),
    ) else {
        return ListingPage::Empty;
    };

    let Some(list) = document.select(&list_selector).next() else {
        return ListingPage::Empty;
    };

    let mut items = Vec::new();
    let mut skipped = 0;

    for entry in list.select(&item_selector) {
        let href = entry
            .select(&link_selector)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        let Some(href) = href else {
            skipped += 1;
            continue;
        };

        let rating = entry
            .select(&star_selector)
            .next()
            .and_then(|star| star.value().attr("title"))
            .and_then(parse_rating);

        items.push(ListingItem {
            href: href.to_string(),
            rating,
        });
    }

    ListingPage::Items { items, skipped }
}

/// Extracts a half-step rating from a star label such as `4,5 estrelas`
///
/// The result always uses `.` as decimal separator and lies in 0..=5.
pub fn parse_rating(label: &str) -> Option<String> {
    RATING_REGEX
        .captures(label)
        .and_then(|captures| captures.get(1))
        .map(|rating| rating.as_str().replace(',', "."))
}
