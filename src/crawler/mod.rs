//! Crawler module for catalog walking and product extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a shared, header-configured client
//! - HTML parsing of catalog and product pages
//! - The per-store pagination loop and the run over all stores

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, StoreCrawl, StoreCrawler};
pub use fetcher::{build_http_client, fetch_page};
pub use parser::{extract_product_links, normalize_price, parse_product, StoreSelectors};
