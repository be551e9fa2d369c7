//! Vitrine main entry point
//!
//! This is the command-line interface for the Vitrine catalog crawler.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitrine::config::{load_config_with_hash, validate, Config};
use vitrine::crawler::run_crawl;
use vitrine::output::{output_path, print_summary};

/// Vitrine: a paginated storefront catalog crawler
///
/// Walks each store's catalog pages until one comes back empty, fetches
/// every product page, and writes `<store>_products.csv` per store. With no
/// arguments the built-in stores are crawled into the current directory.
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(version = "1.0.0")]
#[command(about = "A paginated storefront catalog crawler", long_about = None)]
struct Cli {
    /// Optional TOML configuration file (defaults to the built-in stores)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Directory to write the CSV files into
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum product pages fetched at once per catalog page (0 = unbounded)
    #[arg(long, value_name = "N")]
    max_concurrency: Option<usize>,

    /// Only crawl the named store (repeatable)
    #[arg(long = "store", value_name = "ID")]
    stores: Vec<String>,

    /// Show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    println!("Start scraping...");
    let summary = match run_crawl(&config).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).context("crawl aborted");
        }
    };
    println!("Finished scraping...");

    print_summary(&summary);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vitrine=info,warn"),
            1 => EnvFilter::new("vitrine=debug,info"),
            2 => EnvFilter::new("vitrine=trace,debug"),
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

/// Builds the effective configuration: file or built-ins, then CLI overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("Using built-in store configuration");
            Config::default()
        }
    };

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.display().to_string();
    }

    if let Some(max) = cli.max_concurrency {
        config.crawler.max_concurrent_details = max;
    }

    if !cli.stores.is_empty() {
        for wanted in &cli.stores {
            if !config.stores.iter().any(|s| &s.identifier == wanted) {
                bail!("unknown store '{}'", wanted);
            }
        }
        config.stores.retain(|s| cli.stores.contains(&s.identifier));
    }

    validate(&config).context("invalid configuration")?;

    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Vitrine Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    println!("  Max redirects: {}", config.crawler.max_redirects);
    match config.crawler.max_concurrent_details {
        0 => println!("  Max concurrent product fetches: unbounded"),
        n => println!("  Max concurrent product fetches: {}", n),
    }

    println!("\nHeaders:");
    println!("  Accept: {}", config.headers.accept);
    println!("  Accept-Encoding: {}", config.headers.accept_encoding);
    println!("  Accept-Language: {}", config.headers.accept_language);
    println!("  User-Agent: {}", config.headers.user_agent);

    let output_dir = PathBuf::from(&config.output.directory);
    println!("\nStores ({}):", config.stores.len());
    for store in &config.stores {
        println!("  - {}", store.identifier);
        println!("    catalog:  {}<page>", store.base_url);
        println!("    products: {}", store.products_selector);
        println!("    title:    {}", store.title_selector);
        println!("    price:    {}", store.price_selector);
        println!("    image:    {}", store.image_selector);
        println!(
            "    output:   {}",
            output_path(&output_dir, &store.identifier).display()
        );
    }

    println!("\n✓ Configuration is valid");
}
