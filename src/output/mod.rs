//! Output module for exporting records and reporting progress
//!
//! This module handles:
//! - Rendering records in the Letterboxd CSV import format
//! - Splitting the export into numbered, size-bounded files
//! - Observing crawl progress and collecting run statistics

mod csv_export;
pub mod stats;
mod traits;

pub use csv_export::{export_csv, plan_chunks, render_csv, ChunkPolicy};
pub use stats::{print_statistics, CrawlStatistics, TracingObserver};
pub use traits::CrawlObserver;
