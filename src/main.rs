//! Radiodex main entry point
//!
//! Command-line interface for the Radiodex radio directory scraper.

use anyhow::Context;
use clap::Parser;
use radiodex::config::load_config_with_hash;
use radiodex::crawl::{run_listen_crawl, run_menu_crawl, run_stations_crawl};
use radiodex::model::{Category, MenuGroup};
use radiodex::storage::{CategoryStore, SqliteStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Radiodex: a resumable radio directory scraper
///
/// Crawls a directory-style radio site into a persisted set of genre
/// categories. Interrupted crawls resume where they stopped: categories
/// already persisted are never fetched again.
#[derive(Parser, Debug)]
#[command(name = "radiodex")]
#[command(version)]
#[command(about = "A resumable radio directory scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Crawl the full navigation menu instead of the flat category index
    #[arg(long, conflicts_with = "listen")]
    menu: bool,

    /// Crawl only the menu's "Listen" branch
    #[arg(long, conflicts_with = "menu")]
    listen: bool,

    /// Discard stored categories before crawling
    #[arg(long)]
    fresh: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.fresh {
        clear_store(&config)?;
    }

    if cli.listen {
        let group = run_listen_crawl(&config).await?;
        print_groups(std::slice::from_ref(&group));
    } else if cli.menu {
        let groups = run_menu_crawl(&config).await?;
        print_groups(&groups);
    } else {
        let categories = run_stations_crawl(&config).await?;
        print_categories(&categories);
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("radiodex=info,warn"),
            1 => EnvFilter::new("radiodex=debug,info"),
            2 => EnvFilter::new("radiodex=trace,debug"),
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

/// Discards all stored categories before a crawl (--fresh)
fn clear_store(config: &radiodex::Config) -> anyhow::Result<()> {
    match &config.storage {
        Some(storage) => {
            tracing::info!("Clearing stored categories (--fresh)");
            let mut store = SqliteStore::open(std::path::Path::new(&storage.base_directory))?;
            store.clear()?;
        }
        None => {
            tracing::warn!("--fresh has no effect without a [storage] section");
        }
    }
    Ok(())
}

fn print_categories(categories: &[Category]) {
    let stations: usize = categories.iter().map(|c| c.stations.len()).sum();
    println!(
        "Crawled {} categories, {} stations",
        categories.len(),
        stations
    );
    for category in categories {
        println!("  {} ({} stations)", category.name, category.stations.len());
    }
}

fn print_groups(groups: &[MenuGroup]) {
    for group in groups {
        println!("{} ({} categories)", group.name, group.categories.len());
        for category in &group.categories {
            println!("  {} ({} stations)", category.name, category.stations.len());
        }
    }
}
