//! Favicon URL derivation for rendered bookmarks.

use url::Url;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const FALLBACK_HOST: &str = "example.com";
const FAVICON_SIZE_PX: u32 = 32;

/// Returns the favicon-fetch URL for a bookmark URL.
///
/// Malformed or host-less URLs fall back to a placeholder host.
pub fn favicon_url(bookmark_url: &str) -> String {
    let host = Url::parse(bookmark_url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| FALLBACK_HOST.to_string());
    format!("{FAVICON_SERVICE}?domain={host}&sz={FAVICON_SIZE_PX}")
}
