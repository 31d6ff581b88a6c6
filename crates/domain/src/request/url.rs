//! Request URL builder
//!
//! Composes a base URL, a path, and query parameters into a single
//! fetchable URL. Query parameters passed explicitly overwrite any
//! same-named pair already embedded in the path.

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Builds an absolute URL from a base, a path, and query parameters.
///
/// The resulting query string contains exactly the pairs embedded in
/// `path` plus the provided `query` pairs, last write wins on key
/// collision.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] if the combined base and path do
/// not parse as a URL; the underlying parser message is propagated.
pub fn build_url(base_url: &str, path: &str, query: &[(String, String)]) -> DomainResult<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url =
        Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))?;

    if query.is_empty() {
        return Ok(url);
    }

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    for (key, value) in query {
        pairs.retain(|(k, _)| k != key);
        pairs.push((key.clone(), value.clone()));
    }

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    Ok(url)
}
