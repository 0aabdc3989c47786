//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the exporter, including:
//! - Building the HTTP client with the identifying user agent and timeout
//! - GET requests returning status and body
//! - Error classification (timeouts vs. other transport failures)
//!
//! No request is ever retried. Callers decide whether a failure stops the
//! crawl or only skips one movie.

use crate::config::SiteConfig;
use crate::FilmowError;
use reqwest::Client;
use std::time::Duration;

/// A fetched page, whatever its status
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// Returns true for 4xx and 5xx responses
    pub fn is_error_status(&self) -> bool {
        self.status_code >= 400
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client keeps a cookie jar for the lifetime of the run, sends the
/// configured user agent and applies the configured timeout to every request.
///
/// # Example
///
/// ```no_run
/// use filmow_export::config::SiteConfig;
/// use filmow_export::crawler::build_http_client;
///
/// let client = build_http_client(&SiteConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SiteConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// # Returns
///
/// * `Ok(FetchedPage)` - A response arrived, error statuses included
/// * `Err(FilmowError::Timeout)` - The request timed out
/// * `Err(FilmowError::Http)` - Any other transport failure
pub async fn fetch_url(client: &Client, url: &str) -> Result<FetchedPage, FilmowError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status_code = response.status().as_u16();
    let final_url = response.url().to_string();
    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    tracing::trace!("GET {} -> {} ({})", url, status_code, final_url);

    Ok(FetchedPage {
        final_url,
        status_code,
        body,
    })
}

fn classify_error(url: &str, error: reqwest::Error) -> FilmowError {
    if error.is_timeout() {
        FilmowError::Timeout {
            url: url.to_string(),
        }
    } else {
        FilmowError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
