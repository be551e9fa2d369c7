use serde::Deserialize;

/// Browser-like `Accept` header sent with every request
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// Encodings the client advertises (and decodes)
pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip, deflate, br";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

/// Main configuration structure for Vitrine
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub headers: HeaderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "store", default = "default_stores")]
    pub stores: Vec<StoreConfig>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of product pages fetched at once (0 = unbounded)
    #[serde(rename = "max-concurrent-details", default)]
    pub max_concurrent_details: usize,

    /// Maximum redirect hops followed per request
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_concurrent_details: 0,
            max_redirects: default_max_redirects(),
        }
    }
}

/// Request headers shared by every fetch of a run
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderConfig {
    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(rename = "accept-encoding", default = "default_accept_encoding")]
    pub accept_encoding: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            accept: default_accept(),
            accept_encoding: default_accept_encoding(),
            accept_language: default_accept_language(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the `<identifier>_products.csv` files
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// One store to crawl: where its catalog lives and how to read its pages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Short name used in logs and in the output file name
    pub identifier: String,

    /// Catalog URL template; the page number is appended verbatim
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Selects one container per product on a catalog page
    #[serde(rename = "products-selector")]
    pub products_selector: String,

    #[serde(rename = "title-selector")]
    pub title_selector: String,

    #[serde(rename = "price-selector")]
    pub price_selector: String,

    #[serde(rename = "image-selector")]
    pub image_selector: String,
}

impl StoreConfig {
    /// Musicalle electric guitar catalog
    pub fn musicale() -> Self {
        Self {
            identifier: "musicale".to_string(),
            base_url: "https://musicalle.com.br/cordas/guitarra?page=".to_string(),
            products_selector: "div.main-products div.product-grid-item".to_string(),
            title_selector: "h1".to_string(),
            price_selector: ".product-price".to_string(),
            image_selector: "img#image".to_string(),
        }
    }

    /// Megasom electric guitar catalog
    pub fn megasom() -> Self {
        Self {
            identifier: "megasom".to_string(),
            base_url: "https://www.megasom.com.br/cordas/guitarra?pg=".to_string(),
            products_selector: ".item.flex".to_string(),
            title_selector: "h1".to_string(),
            price_selector: ".preco-avista.precoAvista".to_string(),
            image_selector: ".zoom img".to_string(),
        }
    }
}

impl Default for Config {
    /// Built-in configuration: both stores with browser headers
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            headers: HeaderConfig::default(),
            output: OutputConfig::default(),
            stores: default_stores(),
        }
    }
}

fn default_stores() -> Vec<StoreConfig> {
    vec![StoreConfig::musicale(), StoreConfig::megasom()]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    10
}

fn default_accept() -> String {
    DEFAULT_ACCEPT.to_string()
}

fn default_accept_encoding() -> String {
    DEFAULT_ACCEPT_ENCODING.to_string()
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_output_directory() -> String {
    ".".to_string()
}
