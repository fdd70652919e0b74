//! URL helpers for linkharvest
//!
//! Small, pure helpers shared by the filter chain, the aggregator, and the
//! export layer: netloc derivation for bucketing and file-suffix derivation
//! for the extension tally.

use url::Url;

/// Extracts the netloc (lowercased host plus explicit port) from a URL
///
/// Used as the bucket key when domain bucketing is enabled.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkharvest::url::netloc;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(netloc(&url), "example.com");
///
/// let url = Url::parse("http://example.com:8080/").unwrap();
/// assert_eq!(netloc(&url), "example.com:8080");
/// ```
pub fn netloc(url: &Url) -> String {
    let host = url.host_str().unwrap_or("").to_lowercase();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    }
}

/// Derives the file-type suffix of a link
///
/// The suffix is the text following the last `.` in the link. Links without
/// any `.` tally under their whole string, which groups them as an informal
/// "no extension" bucket of their own.
///
/// # Examples
///
/// ```
/// use linkharvest::url::file_suffix;
///
/// assert_eq!(file_suffix("https://example.com/report.pdf"), "pdf");
/// assert_eq!(file_suffix("https://example.com/a.b.c"), "c");
/// ```
pub fn file_suffix(link: &str) -> String {
    match link.rsplit_once('.') {
        Some((_, suffix)) => suffix.to_string(),
        None => link.to_string(),
    }
}
