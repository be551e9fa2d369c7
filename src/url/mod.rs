//! URL handling for catalog pagination and product links

use crate::VitrineError;
use url::Url;

/// Builds the URL of a catalog page
///
/// The page number is appended verbatim to the store's base URL, which is
/// expected to end in the pagination query parameter (`...?page=`).
///
/// # Examples
///
/// ```
/// use vitrine::url::page_url;
///
/// assert_eq!(
///     page_url("https://example.com/guitars?page=", 3),
///     "https://example.com/guitars?page=3"
/// );
/// ```
pub fn page_url(base: &str, page: u32) -> String {
    format!("{}{}", base, page)
}

/// Resolves a product link found on a catalog page to an absolute URL
///
/// Absolute links pass through; relative links resolve against the
/// catalog page they were found on.
///
/// # Arguments
///
/// * `href` - The raw `href` attribute value
/// * `page_url` - The catalog page the link was found on
///
/// # Returns
///
/// * `Ok(String)` - Absolute HTTP(S) URL
/// * `Err(VitrineError::InvalidLink)` - Empty, unparseable, or non-HTTP link
pub fn resolve_link(href: &str, page_url: &Url) -> Result<String, VitrineError> {
    let trimmed = href.trim();

    if trimmed.is_empty() {
        return Err(invalid_link(href, "empty href"));
    }

    // Absolute links are written exactly as the store published them
    if let Ok(absolute) = Url::parse(trimmed) {
        check_scheme(href, &absolute)?;
        return Ok(trimmed.to_string());
    }

    let absolute = page_url
        .join(trimmed)
        .map_err(|e| invalid_link(href, &e.to_string()))?;

    check_scheme(href, &absolute)?;
    Ok(absolute.to_string())
}

fn check_scheme(href: &str, url: &Url) -> Result<(), VitrineError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid_link(href, &format!("unsupported scheme '{}'", scheme))),
    }
}

fn invalid_link(href: &str, message: &str) -> VitrineError {
    VitrineError::InvalidLink {
        href: href.to_string(),
        message: message.to_string(),
    }
}
