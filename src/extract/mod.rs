//! Detail-page field extraction
//!
//! Every field is resolved by an ordered list of strategies. A strategy is a
//! plain function from a parsed document to an optional value; the first one
//! that yields a value wins. Strategies only return `Some` for non-empty
//! values, so a cascade never settles on a blank match.

mod directors;
mod title;
mod year;

pub use directors::{dedupe_preserving_order, DIRECTOR_STRATEGIES};
pub use title::TITLE_STRATEGIES;
pub use year::{find_year, YEAR_STRATEGIES};

use crate::config::SiteConfig;
use crate::record::MovieRecord;
use scraper::{ElementRef, Html, Selector};

/// Site wording the strategies match against
#[derive(Debug, Clone)]
pub struct ExtractContext {
    /// Lower-case phrase introducing the directors block
    pub directed_by: String,
}

impl ExtractContext {
    pub fn from_site(site: &SiteConfig) -> Self {
        Self {
            directed_by: site.directed_by_phrase.to_lowercase(),
        }
    }
}

impl Default for ExtractContext {
    fn default() -> Self {
        Self::from_site(&SiteConfig::default())
    }
}

/// A single way of locating a field in a detail page
pub type Strategy<T> = fn(&Html, &ExtractContext) -> Option<T>;

/// Tries each strategy in order and returns the first hit
pub fn first_match<T>(
    document: &Html,
    context: &ExtractContext,
    strategies: &[Strategy<T>],
) -> Option<T> {
    strategies
        .iter()
        .find_map(|strategy| strategy(document, context))
}

/// Fields found on a detail page, before the rating is attached
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub title: Option<String>,
    pub directors: Option<String>,
    pub year: Option<String>,
}

/// Runs all field cascades over a detail page
pub fn parse_detail(html: &str, context: &ExtractContext) -> DetailFields {
    let document = Html::parse_document(html);

    let title = first_match(&document, context, TITLE_STRATEGIES);
    let directors = first_match(&document, context, DIRECTOR_STRATEGIES)
        .map(|names| dedupe_preserving_order(names).join(", "));
    let year = first_match(&document, context, YEAR_STRATEGIES);

    DetailFields {
        title,
        directors,
        year,
    }
}

/// Builds a record from a detail page, or `None` when no title resolves
pub fn extract_record(
    html: &str,
    rating: Option<String>,
    context: &ExtractContext,
) -> Option<MovieRecord> {
    let fields = parse_detail(html, context);
    MovieRecord::new(fields.title?, fields.directors, fields.year, rating)
}

pub(crate) fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Text content with runs of whitespace collapsed to single spaces
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

pub(crate) fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Text of the first element matching `css`, if non-empty
pub(crate) fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = selector(css)?;
    document
        .select(&selector)
        .next()
        .and_then(|element| non_empty(element_text(&element)))
}
