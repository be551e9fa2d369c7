use serde::Serialize;

/// One product extracted from a store's product page
///
/// Field order here is the column order of the CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// The product detail URL
    #[serde(rename = "product_link")]
    pub link: String,

    /// Product title, if the page had one
    #[serde(rename = "product_title")]
    pub title: Option<String>,

    /// Normalized price text (e.g. `1234.56`), if the page had one
    #[serde(rename = "product_price")]
    pub price: Option<String>,

    /// Product image URL, if the page had one
    #[serde(rename = "product_img")]
    pub image: Option<String>,
}

impl ProductRecord {
    /// Creates a record with only the link populated
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: None,
            price: None,
            image: None,
        }
    }
}
