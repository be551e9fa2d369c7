//! Output module for crawl results
//!
//! This module handles:
//! - The product record shape shared by parser and writer
//! - Exporting products to per-store CSV files
//! - Summarizing a crawl run

mod export;
mod record;
pub mod stats;

pub use export::{output_path, write_products, write_products_to};
pub use record::ProductRecord;
pub use stats::{print_summary, CrawlSummary, StoreSummary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("No products to write")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
