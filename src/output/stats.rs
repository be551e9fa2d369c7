//! Run statistics
//!
//! This module collects per-store results of a crawl run and prints them.

use std::path::PathBuf;
use std::time::Duration;

/// Result of crawling a single store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    /// Store identifier
    pub identifier: String,

    /// Number of catalog pages that yielded products
    pub pages: u32,

    /// Number of products written
    pub products: usize,

    /// CSV file the products were written to
    pub output_path: PathBuf,
}

/// Summary of a whole crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    /// One entry per store, in crawl order
    pub stores: Vec<StoreSummary>,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Total products across all stores
    pub fn total_products(&self) -> usize {
        self.stores.iter().map(|s| s.products).sum()
    }

    /// Total catalog pages across all stores
    pub fn total_pages(&self) -> u32 {
        self.stores.iter().map(|s| s.pages).sum()
    }
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    for store in &summary.stores {
        println!(
            "  {}: {} items from {} pages -> {}",
            store.identifier,
            store.products,
            store.pages,
            store.output_path.display()
        );
    }
    println!("Total catalog pages: {}", summary.total_pages());
    println!("Total items scraped: {}", summary.total_products());
    println!("Time taken in seconds: {}", summary.elapsed.as_secs_f64());
}
