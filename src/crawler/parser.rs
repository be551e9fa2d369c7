//! HTML parser for catalog and product pages
//!
//! This module handles parsing HTML content to extract:
//! - Product links from a catalog page (one per product container)
//! - Title, price and image from a product page

use crate::config::{compile_selector, StoreConfig};
use crate::output::ProductRecord;
use crate::url::resolve_link;
use crate::{ConfigError, VitrineError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Attributes holding the product image URL, in lookup order
///
/// Lazy-loading storefronts leave `src` out and put the URL in `data-src`.
const IMAGE_ATTRIBUTES: &[&str] = &["src", "data-src"];

/// Currency token stripped from prices
const CURRENCY_TOKEN: &str = "R$";

/// The four compiled selectors of a store
#[derive(Debug, Clone)]
pub struct StoreSelectors {
    /// One match per product container on a catalog page
    pub products: Selector,
    pub title: Selector,
    pub price: Selector,
    pub image: Selector,
}

impl StoreSelectors {
    /// Compiles a store's selectors
    ///
    /// # Returns
    ///
    /// * `Ok(StoreSelectors)` - All four selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - A selector failed to parse
    pub fn compile(store: &StoreConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            products: compile_selector(&store.products_selector)?,
            title: compile_selector(&store.title_selector)?,
            price: compile_selector(&store.price_selector)?,
            image: compile_selector(&store.image_selector)?,
        })
    }
}

/// First `<a>` element inside a product container, in document order
fn first_anchor(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    container
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "a")
}

/// Extracts the product links of a catalog page
///
/// Each product container contributes the `href` of its first anchor,
/// resolved against the catalog page URL. Links keep document order.
/// An empty result means the catalog has no more pages.
///
/// # Arguments
///
/// * `html` - The catalog page body
/// * `products` - Selector matching product containers
/// * `page_url` - The catalog page URL, for resolving relative links
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Absolute product URLs (possibly empty)
/// * `Err(VitrineError::MissingAnchor)` - A container holds no anchor
/// * `Err(VitrineError::MissingHref)` - A container's anchor has no `href`
/// * `Err(VitrineError::InvalidLink)` - An `href` could not be resolved
///
/// # Example
///
/// ```
/// use scraper::Selector;
/// use url::Url;
/// use vitrine::crawler::extract_product_links;
///
/// let html = r#"<div class="item"><a href="/p/1">One</a></div>"#;
/// let products = Selector::parse("div.item").unwrap();
/// let page = Url::parse("https://shop.example.com/list?page=1").unwrap();
/// let links = extract_product_links(html, &products, &page).unwrap();
/// assert_eq!(links, vec!["https://shop.example.com/p/1".to_string()]);
/// ```
pub fn extract_product_links(
    html: &str,
    products: &Selector,
    page_url: &Url,
) -> Result<Vec<String>, VitrineError> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for (index, container) in document.select(products).enumerate() {
        let anchor = first_anchor(container).ok_or_else(|| VitrineError::MissingAnchor {
            page_url: page_url.to_string(),
            index,
        })?;

        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| VitrineError::MissingHref {
                page_url: page_url.to_string(),
                index,
            })?;

        links.push(resolve_link(href, page_url)?);
    }

    Ok(links)
}

/// Extracts a product record from a product page
///
/// Every field is looked up independently; a missing element leaves only
/// its own field empty.
pub fn parse_product(html: &str, link: &str, selectors: &StoreSelectors) -> ProductRecord {
    let document = Html::parse_document(html);

    let title = first_text(&document, &selectors.title);

    let price = first_text(&document, &selectors.price)
        .map(|raw| normalize_price(&raw))
        .filter(|price| !price.is_empty());

    let image = document
        .select(&selectors.image)
        .next()
        .and_then(image_source);

    ProductRecord {
        link: link.to_string(),
        title,
        price,
        image,
    }
}

/// Text of the first element matching `selector`, whitespace-trimmed
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Joins the trimmed text nodes of an element with single spaces
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty image attribute of a present element
fn image_source(element: ElementRef<'_>) -> Option<String> {
    IMAGE_ATTRIBUTES
        .iter()
        .filter_map(|name| element.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Normalizes a displayed price to a plain decimal string
///
/// Strips the `R$` token and all whitespace. When a comma is present it is
/// the decimal separator and dots are thousands separators. Without a
/// comma, dots are dropped only when the text carries the currency token and
/// the dots form pure thousands groups (`R$ 1.234`); otherwise the dot is
/// already a decimal point. Normalized output holds neither `R$` nor a comma,
/// so applying the function to its own output returns it unchanged.
///
/// # Examples
///
/// ```
/// use vitrine::crawler::normalize_price;
///
/// assert_eq!(normalize_price("R$ 1.234,56"), "1234.56");
/// assert_eq!(normalize_price("1234.56"), "1234.56");
/// ```
pub fn normalize_price(raw: &str) -> String {
    let cleaned: String = raw
        .replace(CURRENCY_TOKEN, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if raw.contains(CURRENCY_TOKEN) && is_thousands_grouped(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    }
}

/// True for `d.ddd`, `dd.ddd.ddd` and similar dot-grouped integers
fn is_thousands_grouped(text: &str) -> bool {
    let mut groups = text.split('.');
    let lead = match groups.next() {
        Some(lead) => lead,
        None => return false,
    };

    if !text.contains('.') || lead.is_empty() || lead.len() > 3 {
        return false;
    }

    lead.chars().all(|c| c.is_ascii_digit())
        && groups.all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
}
