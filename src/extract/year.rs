//! Release year strategies

use super::{element_text, selector, ExtractContext, Strategy};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("hardcoded regex pattern is valid"));

pub const YEAR_STRATEGIES: &[Strategy<String>] = &[heading_year, page_title_year, legacy_release];

/// First standalone four-digit number in `text`
pub fn find_year(text: &str) -> Option<String> {
    YEAR_REGEX
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|year| year.as_str().to_string())
}

fn year_in(document: &Html, css: &str) -> Option<String> {
    let selector = selector(css)?;
    let element = document.select(&selector).next()?;
    find_year(&element_text(&element))
}

fn heading_year(document: &Html, _: &ExtractContext) -> Option<String> {
    year_in(document, "h1.movie__title span.movie__year")
}

fn page_title_year(document: &Html, _: &ExtractContext) -> Option<String> {
    year_in(document, "title")
}

fn legacy_release(document: &Html, _: &ExtractContext) -> Option<String> {
    year_in(document, "div.movie-title small.release")
}
