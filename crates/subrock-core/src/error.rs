//! Error type for the HTTP seam (API fetch and reachability probe).

use thiserror::Error;

/// Failure of a single request against the API or a probed host.
///
/// Kept typed (rather than `anyhow`) so callers can tell a transport
/// failure from an HTTP status or a malformed body.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The configured endpoint is not a valid absolute URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Curl reported an error (DNS, connect, TLS, timeout...).
    #[error("{0}")]
    Transport(#[from] curl::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),

    /// The body was not the JSON shape we expect.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
