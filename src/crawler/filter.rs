//! Link filter chain
//!
//! A candidate link survives only if it passes every enabled filter, in
//! order: type-include, type-exclude, keyword-include, keyword-exclude,
//! domain scope. An empty filter set is vacuously satisfied. The whole
//! chain is a pure function of its inputs.

use crate::config::FilterConfig;
use url::Url;

/// Decides whether a candidate link survives the configured filters
///
/// # Arguments
///
/// * `link` - The candidate link (absolute URL string)
/// * `source` - URL of the page the link was found on (for domain scope)
/// * `filters` - The filter configuration
pub fn passes(link: &str, source: &Url, filters: &FilterConfig) -> bool {
    // Type-include: suffix match against the full link string
    if !filters.include_types.is_empty()
        && !filters.include_types.iter().any(|t| link.ends_with(t))
    {
        return false;
    }

    // Type-exclude
    if filters.exclude_types.iter().any(|t| link.ends_with(t)) {
        return false;
    }

    // Keyword filters, case-folded unless configured otherwise
    if !filters.include_keywords.is_empty()
        && !contains_any(link, &filters.include_keywords, filters.case_sensitive)
    {
        return false;
    }

    if contains_any(link, &filters.exclude_keywords, filters.case_sensitive) {
        return false;
    }

    // Domain scope: hosts must match exactly, schemes ignored, subdomains
    // are distinct hosts
    if !filters.include_external && !same_host(link, source) {
        return false;
    }

    true
}

fn contains_any(link: &str, keywords: &[String], case_sensitive: bool) -> bool {
    if case_sensitive {
        keywords.iter().any(|k| link.contains(k.as_str()))
    } else {
        let folded = link.to_lowercase();
        keywords.iter().any(|k| folded.contains(&k.to_lowercase()))
    }
}

fn same_host(link: &str, source: &Url) -> bool {
    match Url::parse(link) {
        Ok(parsed) => parsed.host_str().is_some() && parsed.host_str() == source.host_str(),
        Err(_) => false,
    }
}
