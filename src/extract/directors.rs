//! Director strategies
//!
//! Each strategy returns the raw name list in page order; de-duplication and
//! joining happen once the cascade has settled.

use super::{element_text, selector, ExtractContext, Strategy};
use scraper::Html;
use std::collections::HashSet;

pub const DIRECTOR_STRATEGIES: &[Strategy<Vec<String>>] =
    &[info_label_block, mobile_directors, legacy_directors];

/// First `div.movie__info-label` headed by the directed-by phrase
fn info_label_block(document: &Html, context: &ExtractContext) -> Option<Vec<String>> {
    let block_selector = selector("div.movie__info-label")?;
    let heading_selector = selector("h3")?;
    let link_selector = selector("a")?;

    document.select(&block_selector).find_map(|block| {
        let heading = block.select(&heading_selector).next()?;
        if !mentions(&element_text(&heading), &context.directed_by) {
            return None;
        }

        non_empty_names(block.select(&link_selector).map(|link| element_text(&link)))
    })
}

fn mobile_directors(document: &Html, context: &ExtractContext) -> Option<Vec<String>> {
    let heading_selector = selector("div.movie__mobile-directors h3")?;
    let link_selector = selector("div.movie__mobile-directors a.movie__genre")?;

    let heading = document.select(&heading_selector).next()?;
    if !mentions(&element_text(&heading), &context.directed_by) {
        return None;
    }

    non_empty_names(document.select(&link_selector).map(|link| element_text(&link)))
}

fn legacy_directors(document: &Html, _: &ExtractContext) -> Option<Vec<String>> {
    let name_selector = selector(r#"div.directors a span[itemprop="name"]"#)?;
    non_empty_names(document.select(&name_selector).map(|name| element_text(&name)))
}

fn mentions(heading: &str, phrase: &str) -> bool {
    heading.to_lowercase().contains(phrase)
}

fn non_empty_names(names: impl Iterator<Item = String>) -> Option<Vec<String>> {
    let names: Vec<String> = names.filter(|name| !name.is_empty()).collect();
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Removes repeated names, keeping the first occurrence of each
pub fn dedupe_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
