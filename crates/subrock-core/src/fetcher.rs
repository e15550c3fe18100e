//! API fetch with failures folded into "no data".

use std::io::Write;

use anyhow::Result;

use crate::client::UrlSource;
use crate::model::ApiResponse;

/// Fetch the API response for `domain`.
///
/// Transport errors, non-2xx statuses and malformed bodies are logged and
/// reported on `out`; the caller gets `None` and skips the target.
pub fn fetch_urls<S: UrlSource + ?Sized>(
    source: &S,
    domain: &str,
    out: &mut dyn Write,
) -> Result<Option<ApiResponse>> {
    tracing::info!("fetching URLs for {}", domain);
    match source.fetch_urls(domain) {
        Ok(response) => {
            match &response.data {
                Some(data) => tracing::info!(
                    "fetched {} URLs in {} groups for {}",
                    data.record_count(),
                    data.groups().len(),
                    domain
                ),
                None => tracing::info!("response for {} has no data", domain),
            }
            Ok(Some(response))
        }
        Err(e) => {
            tracing::error!("Failed to fetch URLs for {}: {}", domain, e);
            writeln!(out, "Failed to fetch URLs for {}: {}", domain, e)?;
            Ok(None)
        }
    }
}
