//! Configuration module for filmow-export
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so running without a file is
//! the common case.
//!
//! # Example
//!
//! ```no_run
//! use filmow_export::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("filmow.toml")).unwrap();
//! println!("Fetching from: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ExportConfig, PolicyKind, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
