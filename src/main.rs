//! Webwalk main entry point
//!
//! Command-line interface for the webwalk bounded breadth-first crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use webwalk::config::{load_config, validate, Config};
use webwalk::crawler::{CrawlStats, Crawler, HttpFetcher};
use webwalk::snapshot::{JsonSnapshotStore, SnapshotStore, SqliteSnapshotStore};
use webwalk::url::canonicalize_url;

/// Webwalk: a bounded, resumable breadth-first web crawler
///
/// Webwalk discovers reachable pages starting from a root URL, bounded by
/// traversal depth and discovered-URL count, with allow/exclude prefix
/// filtering. A crawl can be suspended to a snapshot file and resumed later.
#[derive(Parser, Debug)]
#[command(name = "webwalk")]
#[command(version)]
#[command(about = "A bounded, resumable breadth-first web crawler", long_about = None)]
struct Cli {
    /// Root URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum depth to traverse from the root
    #[arg(short, long, value_name = "N")]
    depth: Option<u32>,

    /// Maximum number of URLs to discover
    #[arg(short, long, value_name = "N")]
    number: Option<u64>,

    /// Exclude URLs with this prefix (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "PREFIX")]
    exclude: Vec<String>,

    /// Allow URLs with this prefix (repeatable)
    #[arg(short, long = "allowed", value_name = "PREFIX")]
    allowed: Vec<String>,

    /// Snapshot file name; a .db/.sqlite/.sqlite3 extension selects the
    /// SQLite backend, anything else JSON
    #[arg(short, long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Load initial state from the snapshot if available
    #[arg(short, long, requires = "snapshot")]
    load: bool,

    /// Path to a TOML configuration file (command-line flags win)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Suppress status messages
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let root_url = canonicalize_url(&cli.url).context("invalid root URL")?;

    let fetcher = HttpFetcher::new(&config.fetcher).context("failed to build HTTP client")?;
    let mut crawler = Crawler::new(config.crawler, &root_url, fetcher)?;

    let store = match cli.snapshot.as_deref() {
        Some(path) => Some(open_store(&root_url, path)?),
        None => None,
    };

    if cli.load {
        // -l requires -s, so a store is always present here.
        if let Some(store) = &store {
            match crawler.load(store.as_ref()) {
                Ok(()) => tracing::info!("Loaded snapshot, resuming crawl"),
                Err(e) => tracing::warn!(
                    "Error during loading crawler data, so resorting to initial data: {}",
                    e
                ),
            }
        }
    }

    let stats = crawler.run().await;

    print_stats(&stats);

    if let Some(store) = &store {
        if let Err(e) = crawler.dump(store.as_ref()) {
            tracing::error!("Error during dumping crawler data: {}", e);
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webwalk=info,warn"),
            1 => EnvFilter::new("webwalk=debug,info"),
            2 => EnvFilter::new("webwalk=trace,debug"),
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

/// Assembles the effective configuration: TOML file if given, defaults
/// otherwise, then command-line overrides, then validation
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.depth_limit = depth;
    }
    if let Some(number) = cli.number {
        config.crawler.max_urls_count = number;
    }
    if !cli.allowed.is_empty() {
        config.crawler.allowed_prefixes = cli.allowed.clone();
    }
    if !cli.exclude.is_empty() {
        config.crawler.excluded_prefixes = cli.exclude.clone();
    }

    validate(&config)?;

    Ok(config)
}

/// Opens the snapshot store named on the command line
///
/// The backend is chosen by file extension: SQLite for database-style
/// extensions, JSON for everything else.
fn open_store(root_url: &str, path: &Path) -> anyhow::Result<Box<dyn SnapshotStore>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("db") | Some("sqlite") | Some("sqlite3") => {
            let store = SqliteSnapshotStore::new(root_url, path)
                .with_context(|| format!("failed to open snapshot database {}", path.display()))?;
            Ok(Box::new(store))
        }
        _ => Ok(Box::new(JsonSnapshotStore::new(root_url, path))),
    }
}

/// Prints the final statistics block
fn print_stats(stats: &CrawlStats) {
    println!("==========");
    println!("STATISTICS");
    println!("==========");
    println!("URLs found: {}", stats.discovered_count);
    println!("URLs visited: {}", stats.visited_count);
}
