//! Reachability pre-check run before fetching when `--check` is given.

use crate::client::UrlSource;

/// URL probed for a target: the target itself when it already has an
/// http(s) scheme, otherwise `http://{target}`.
pub fn probe_url(target: &str) -> String {
    let lower = target.get(..8).unwrap_or(target).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        target.to_string()
    } else {
        format!("http://{}", target)
    }
}

/// True only if a HEAD request (redirects followed) ends in exactly HTTP 200.
pub fn is_accessible<S: UrlSource + ?Sized>(source: &S, url: &str) -> bool {
    match source.probe_status(url) {
        Ok(200) => {
            tracing::info!("URL {} is accessible", url);
            true
        }
        Ok(code) => {
            tracing::warn!("URL {} answered HTTP {}", url, code);
            false
        }
        Err(e) => {
            tracing::error!("URL {} is not accessible: {}", url, e);
            false
        }
    }
}
