//! HTML link extraction
//!
//! Parses page markup and yields the hyperlink targets as absolute URLs,
//! in the order they appear in the document. `scraper` is lenient, so
//! malformed markup degrades to an empty or partial link list rather than
//! an error.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all hyperlink targets from an HTML document
///
/// Relative hrefs are resolved against `base_url`. Links that cannot be
/// followed over HTTP are skipped:
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - fragment-only anchors
/// - hrefs that fail to resolve to a valid URL
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL of the page, for resolving relative links
///
/// # Returns
///
/// Absolute URLs in markup order
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    // Try to resolve the URL
    match base_url.join(href) {
        Ok(absolute_url) => {
            // Only accept HTTP and HTTPS URLs
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
