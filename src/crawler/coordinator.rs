//! Crawler coordinator - catalog pagination and product fan-out
//!
//! This module contains the crawl loop for one store and the run over all
//! configured stores:
//! - Walking catalog pages until one yields no product links
//! - Fetching every product page of a catalog page concurrently
//! - Writing each store's products to its CSV file

use crate::config::{Config, StoreConfig};
use crate::crawler::parser::{extract_product_links, parse_product, StoreSelectors};
use crate::crawler::{build_http_client, fetch_page};
use crate::output::{output_path, write_products, CrawlSummary, ProductRecord, StoreSummary};
use crate::url::page_url;
use crate::VitrineError;
use futures::future::try_join_all;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use url::Url;

/// Products collected from one store
#[derive(Debug, Clone, Default)]
pub struct StoreCrawl {
    /// Catalog pages that yielded at least one product
    pub pages: u32,

    /// Products in catalog order
    pub products: Vec<ProductRecord>,
}

/// Crawls the catalog of a single store
pub struct StoreCrawler {
    client: Client,
    store: StoreConfig,
    selectors: StoreSelectors,
    limiter: Option<Arc<Semaphore>>,
}

impl StoreCrawler {
    /// Creates a crawler for one store
    ///
    /// # Arguments
    ///
    /// * `client` - The run's shared HTTP client
    /// * `store` - The store to crawl
    /// * `max_concurrency` - Cap on simultaneous product fetches (0 = unbounded)
    ///
    /// # Returns
    ///
    /// * `Ok(StoreCrawler)` - Ready to crawl
    /// * `Err(VitrineError::Config)` - A selector failed to compile
    pub fn new(
        client: Client,
        store: StoreConfig,
        max_concurrency: usize,
    ) -> Result<Self, VitrineError> {
        let selectors = StoreSelectors::compile(&store)?;
        let limiter = (max_concurrency > 0).then(|| Arc::new(Semaphore::new(max_concurrency)));

        Ok(Self {
            client,
            store,
            selectors,
            limiter,
        })
    }

    /// Runs the pagination loop
    ///
    /// Starting at page 1, each catalog page's product links are fetched
    /// concurrently and appended in link order. The loop stops at the first
    /// page with no product links. Any fetch or parse failure aborts the
    /// crawl and discards what was collected.
    pub async fn crawl(&self) -> Result<StoreCrawl, VitrineError> {
        let identifier = &self.store.identifier;
        let mut result = StoreCrawl::default();
        let mut page = 1;

        loop {
            let links = self.product_links(page).await?;
            if links.is_empty() {
                tracing::info!("[{}] page {} has no products, catalog done", identifier, page);
                break;
            }

            tracing::info!("[{}] page {}: {} products", identifier, page, links.len());

            let records = self.fetch_products(&links).await?;
            result.products.extend(records);
            result.pages += 1;
            page += 1;
        }

        tracing::info!(
            "[{}] collected {} products from {} pages",
            identifier,
            result.products.len(),
            result.pages
        );

        Ok(result)
    }

    /// Fetches catalog page `page` and returns its product links
    pub async fn product_links(&self, page: u32) -> Result<Vec<String>, VitrineError> {
        let url = page_url(&self.store.base_url, page);
        tracing::debug!("[{}] fetching catalog page {}", self.store.identifier, url);

        let parsed_url = Url::parse(&url)?;
        let body = fetch_page(&self.client, &url).await?;
        extract_product_links(&body, &self.selectors.products, &parsed_url)
    }

    /// Fetches and parses one product page
    pub async fn product(&self, link: &str) -> Result<ProductRecord, VitrineError> {
        // Held until the page is parsed
        let _permit = match &self.limiter {
            Some(limiter) => Some(limiter.acquire().await?),
            None => None,
        };

        tracing::debug!("[{}] fetching product {}", self.store.identifier, link);
        let body = fetch_page(&self.client, link).await?;
        Ok(parse_product(&body, link, &self.selectors))
    }

    /// Fetches all product pages concurrently, preserving link order
    async fn fetch_products(&self, links: &[String]) -> Result<Vec<ProductRecord>, VitrineError> {
        try_join_all(links.iter().map(|link| self.product(link))).await
    }
}

/// Runs a complete crawl over every configured store
///
/// One HTTP client is shared by all requests of the run. Stores are crawled
/// one after another; each store's products are written to
/// `<output dir>/<identifier>_products.csv` as soon as its crawl finishes.
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Per-store counts and total elapsed time
/// * `Err(VitrineError)` - The first failure; the run stops there
///
/// # Example
///
/// ```no_run
/// use vitrine::config::Config;
/// use vitrine::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(&Config::default()).await?;
/// println!("{} products", summary.total_products());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlSummary, VitrineError> {
    let start_time = Instant::now();
    let client = build_http_client(&config.headers, &config.crawler)?;
    let output_dir = Path::new(&config.output.directory);

    let mut summary = CrawlSummary::default();

    for store in &config.stores {
        tracing::info!("[{}] crawling {}", store.identifier, store.base_url);

        let crawler = StoreCrawler::new(
            client.clone(),
            store.clone(),
            config.crawler.max_concurrent_details,
        )?;
        let crawl = crawler.crawl().await?;

        let path = output_path(output_dir, &store.identifier);
        write_products(&crawl.products, &path)?;
        tracing::info!(
            "[{}] wrote {} products to {}",
            store.identifier,
            crawl.products.len(),
            path.display()
        );

        summary.stores.push(StoreSummary {
            identifier: store.identifier.clone(),
            pages: crawl.pages,
            products: crawl.products.len(),
            output_path: path,
        });
    }

    summary.elapsed = start_time.elapsed();
    Ok(summary)
}
