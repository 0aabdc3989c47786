//! Title strategies
//!
//! The original-language title wins over the localized heading when present,
//! since that is what the import target matches against.

use super::{element_text, first_text, non_empty, selector, ExtractContext, Strategy};
use scraper::Html;

pub const TITLE_STRATEGIES: &[Strategy<String>] = &[
    original_title,
    legacy_original_title,
    heading_without_year,
    legacy_profile_heading,
];

fn original_title(document: &Html, _: &ExtractContext) -> Option<String> {
    first_text(document, "h3.movie__original-title")
}

fn legacy_original_title(document: &Html, _: &ExtractContext) -> Option<String> {
    first_text(document, "h2.movie-original-title")
}

/// `h1.movie__title` minus the nested year span
fn heading_without_year(document: &Html, _: &ExtractContext) -> Option<String> {
    let heading_selector = selector("h1.movie__title")?;
    let year_selector = selector("span.movie__year")?;
    let heading = document.select(&heading_selector).next()?;

    let year_nodes: Vec<_> = heading.select(&year_selector).map(|year| year.id()).collect();
    if year_nodes.is_empty() {
        return non_empty(element_text(&heading));
    }

    let text: String = heading
        .descendants()
        .filter(|node| !node.ancestors().any(|ancestor| year_nodes.contains(&ancestor.id())))
        .filter_map(|node| node.value().as_text().map(|text| String::from(&**text)))
        .collect();

    non_empty(strip_year_leftovers(&text))
}

fn legacy_profile_heading(document: &Html, _: &ExtractContext) -> Option<String> {
    first_text(document, "div.movie-profile div.movie-title h1")
}

/// Drops the empty parentheses left behind once the year is removed
fn strip_year_leftovers(text: &str) -> String {
    let collapsed = super::collapse_whitespace(text);
    let mut title = collapsed.as_str();
    while let Some(stripped) = title
        .strip_suffix("()")
        .or_else(|| title.strip_suffix("( )"))
    {
        title = stripped.trim_end();
    }
    title.to_string()
}
