//! filmow-export main entry point
//!
//! This is the command-line interface that turns a Filmow watched list into
//! Letterboxd import files.

use clap::Parser;
use filmow_export::config::{load_config_with_hash, Config, PolicyKind};
use filmow_export::crawler::{listing_url, normalize_user};
use filmow_export::output::print_statistics;
use filmow_export::{run_export, FilmowError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const IMPORT_HINT: &str = "Done! Go to https://letterboxd.com/import/, click SELECT A FILE and pick the generated CSV file(s).";

/// filmow-export: export your Filmow watched list to Letterboxd
///
/// Walks every page of the user's "já vi" list, reads each movie's detail
/// page and writes numbered CSV files ready for Letterboxd's importer.
#[derive(Parser, Debug)]
#[command(name = "filmow-export")]
#[command(version = "1.0.0")]
#[command(about = "Export a Filmow watched list as Letterboxd CSV files", long_about = None)]
struct Cli {
    /// Filmow user handle (prompted for when omitted)
    #[arg(value_name = "USER")]
    user: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory the CSV files are written to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// How the export is split into files
    #[arg(long, value_enum)]
    policy: Option<PolicyKind>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and listing URL without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(dir) = cli.output_dir {
        config.export.output_dir = dir;
    }
    if let Some(policy) = cli.policy {
        config.export.policy = policy;
    }
    filmow_export::config::validate(&config)?;

    let user = match cli.user {
        Some(user) => user,
        None => prompt_user()?,
    };

    if cli.dry_run {
        return handle_dry_run(&config, &user);
    }

    handle_export(&config, &user).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("filmow_export=info,warn"),
            1 => EnvFilter::new("filmow_export=debug,info"),
            2 => EnvFilter::new("filmow_export=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn prompt_user() -> io::Result<String> {
    print!("Enter your Filmow user name: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let user = normalize_user(user)?;
    let listing = listing_url(&url::Url::parse(&config.site.base_url)?, &user)?;

    println!("=== filmow-export Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  User agent: {}", config.site.user_agent);
    println!("  Timeout: {}s", config.site.timeout_secs);
    println!("  Page parameter: {}", config.site.page_param);

    println!("\nExport:");
    println!("  Policy: {:?}", config.export.chunk_policy());
    println!("  Output directory: {}", config.export.output_dir.display());
    println!("  Files: 1{}.csv, 2{}.csv, ...", user, user);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling at {}", listing);

    Ok(())
}

/// Runs the export, re-prompting once for the handle if the crawl fails
async fn handle_export(config: &Config, user: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Import started. Follow the progress below:");

    match run_export(config, user).await {
        Ok(summary) => {
            print_statistics(&summary.statistics);
            println!("{}", IMPORT_HINT);
            Ok(())
        }
        Err(e) if is_user_error(&e) => {
            tracing::debug!("First attempt failed: {}", e);
            println!(
                "User {} not found. Are you sure you typed it correctly?",
                user.trim()
            );

            let retry = prompt_user()?;
            match run_export(config, &retry).await {
                Ok(summary) => {
                    print_statistics(&summary.statistics);
                    println!("{}", IMPORT_HINT);
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            Err(e.into())
        }
    }
}

fn is_user_error(error: &FilmowError) -> bool {
    error.is_fatal_crawl() || matches!(error, FilmowError::InvalidUser(_))
}
