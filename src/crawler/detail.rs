//! Detail page fetching

use crate::crawler::fetcher::fetch_url;
use crate::extract::{extract_record, ExtractContext};
use crate::record::MovieRecord;
use crate::FilmowError;
use reqwest::Client;
use url::Url;

/// Fetches one movie's detail page and extracts its record
///
/// # Returns
///
/// * `Ok(Some(MovieRecord))` - The page resolved to a titled record
/// * `Ok(None)` - The page parsed but no title could be found
/// * `Err(FilmowError)` - Transport failure or error status
pub async fn fetch_movie(
    client: &Client,
    detail_url: &Url,
    rating: Option<String>,
    context: &ExtractContext,
) -> Result<Option<MovieRecord>, FilmowError> {
    let page = fetch_url(client, detail_url.as_str()).await?;

    if page.is_error_status() {
        return Err(FilmowError::DetailStatus {
            url: detail_url.to_string(),
            status: page.status_code,
        });
    }

    Ok(extract_record(&page.body, rating, context))
}
