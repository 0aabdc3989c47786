use crate::output::ChunkPolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for filmow-export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Target site and request configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root used to build listing URLs and resolve detail links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Query parameter carrying the listing page number
    #[serde(rename = "page-param")]
    pub page_param: String,

    /// Lower-case phrase in the listing heading that marks a missing user
    #[serde(rename = "not-found-phrase")]
    pub not_found_phrase: String,

    /// Lower-case phrase in the info heading that introduces directors
    #[serde(rename = "directed-by-phrase")]
    pub directed_by_phrase: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://filmow.com".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) filmow_to_letterboxd/1.0".to_string(),
            timeout_secs: 20,
            page_param: "pagina".to_string(),
            not_found_phrase: "não encontrada".to_string(),
            directed_by_phrase: "dirigido por".to_string(),
        }
    }
}

/// Which bound splits the CSV output into files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Split when the rendered file would exceed `max-bytes`
    #[default]
    Bytes,
    /// Split every `max-rows` records
    Rows,
}

/// CSV export configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub policy: PolicyKind,

    /// Byte ceiling per file (header included)
    #[serde(rename = "max-bytes")]
    pub max_bytes: usize,

    /// Row ceiling per file (header excluded)
    #[serde(rename = "max-rows")]
    pub max_rows: usize,

    /// Directory the numbered CSV files are written to
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Bytes,
            max_bytes: 1_000_000,
            max_rows: 1900,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    /// Builds the chunking policy selected by `policy`
    pub fn chunk_policy(&self) -> ChunkPolicy {
        match self.policy {
            PolicyKind::Bytes => ChunkPolicy::MaxBytes(self.max_bytes),
            PolicyKind::Rows => ChunkPolicy::MaxRows(self.max_rows),
        }
    }
}
