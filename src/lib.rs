//! filmow-export: exports a Filmow "watched" list as Letterboxd import CSVs
//!
//! This crate walks a user's `ja-vi` listing on Filmow page by page, resolves
//! every listed movie to its detail page, extracts title, directors, year and
//! the user's star rating, and writes the result as size-bounded CSV chunks.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for filmow-export operations
#[derive(Debug, Error)]
pub enum FilmowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Listing page {page} returned HTTP {status}")]
    ListingStatus { page: u32, status: u16 },

    #[error("Listing page {page} reports the user was not found")]
    UserNotFound { page: u32 },

    #[error("Detail page {url} returned HTTP {status}")]
    DetailStatus { url: String, status: u16 },

    #[error("Invalid user handle: {0:?}")]
    InvalidUser(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilmowError {
    /// Returns true if the error stops the whole crawl rather than one movie
    pub fn is_fatal_crawl(&self) -> bool {
        matches!(
            self,
            Self::ListingStatus { .. }
                | Self::UserNotFound { .. }
                | Self::Http { .. }
                | Self::Timeout { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for filmow-export operations
pub type Result<T> = std::result::Result<T, FilmowError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_export, ExportSummary};
pub use output::ChunkPolicy;
pub use record::{MovieRecord, RecordStore};
