// src/utils/url.rs

//! URL manipulation utilities.

use sha2::{Digest, Sha256};
use url::Url;

use crate::models::AssetNaming;

/// Resolve a potentially relative URL against a base URL.
///
/// # Examples
/// ```
/// use poster_harvest::utils::url::resolve;
///
/// assert_eq!(
///     resolve("https://example.com/people/1/collect", "/img/a.jpg"),
///     "https://example.com/img/a.jpg"
/// );
/// ```
pub fn resolve(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Final non-empty path segment of a URL, ignoring query and fragment.
///
/// # Examples
/// ```
/// use poster_harvest::utils::url::final_segment;
///
/// assert_eq!(
///     final_segment("https://img.example.com/view/photo/s_ratio/p123.jpg?x=1"),
///     Some("p123.jpg".to_string())
/// );
/// ```
pub fn final_segment(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Not an absolute URL: strip query/fragment by hand
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

/// Local filename for an asset URL under the given naming strategy.
///
/// URLs without a usable final segment always get the hashed form.
pub fn asset_filename(url: &str, naming: AssetNaming) -> String {
    match (naming, final_segment(url)) {
        (AssetNaming::Segment, Some(segment)) => sanitize(&segment),
        (AssetNaming::Hashed, Some(segment)) => {
            format!("{}-{}", short_hash(url), sanitize(&segment))
        }
        (_, None) => short_hash(url),
    }
}

/// Replace characters that are not safe in a filename.
fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}' => '_',
            c => c,
        })
        .collect()
}

/// First 8 hex digits of the SHA-256 of the input.
fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(&digest[..4])
}
