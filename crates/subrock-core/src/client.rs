//! HTTP access to the urls-by-domain API and to probed hosts.
//!
//! Uses the curl crate (libcurl `Easy` handle); one handle per request,
//! blocking on the current thread.

use std::time::Duration;
use url::Url;

use crate::config::SubrockConfig;
use crate::error::FetchError;
use crate::model::ApiResponse;

/// Everything the runner needs from the network.
pub trait UrlSource {
    /// GET the API for `domain` and parse the JSON body.
    fn fetch_urls(&self, domain: &str) -> Result<ApiResponse, FetchError>;

    /// HEAD `url`, following redirects, and return the final status code.
    fn probe_status(&self, url: &str) -> Result<u32, FetchError>;
}

/// libcurl-backed [`UrlSource`].
#[derive(Debug, Clone)]
pub struct CurlClient {
    endpoint: Url,
    /// `None` leaves libcurl's default in place.
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl CurlClient {
    pub fn from_config(cfg: &SubrockConfig) -> Result<Self, FetchError> {
        Ok(Self {
            endpoint: Url::parse(&cfg.api_endpoint)?,
            connect_timeout: non_zero_secs(cfg.connect_timeout_secs),
            timeout: non_zero_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
        })
    }

    /// Endpoint with `domain` appended as an encoded query parameter.
    pub fn request_url(&self, domain: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("domain", domain);
        url
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        if let Some(d) = self.connect_timeout {
            easy.connect_timeout(d)?;
        }
        if let Some(d) = self.timeout {
            easy.timeout(d)?;
        }
        Ok(easy)
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl UrlSource for CurlClient {
    fn fetch_urls(&self, domain: &str) -> Result<ApiResponse, FetchError> {
        let url = self.request_url(domain);
        tracing::debug!("GET {}", url);

        let mut body = Vec::new();
        let mut easy = self.easy(url.as_str())?;
        easy.get(true)?;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        tracing::debug!("GET {} returned HTTP {} ({} bytes)", url, code, body.len());

        Ok(serde_json::from_slice(&body)?)
    }

    fn probe_status(&self, url: &str) -> Result<u32, FetchError> {
        let mut easy = self.easy(url)?;
        easy.nobody(true)?; // HEAD request
        easy.perform()?;
        let code = easy.response_code()?;
        tracing::debug!("HEAD {} returned HTTP {}", url, code);
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(endpoint: &str) -> CurlClient {
        let cfg = SubrockConfig {
            api_endpoint: endpoint.to_string(),
            ..SubrockConfig::default()
        };
        CurlClient::from_config(&cfg).unwrap()
    }

    #[test]
    fn request_url_encodes_domain() {
        let client = client_for("https://api.example.com/v2/urls-by-domain");
        assert_eq!(
            client.request_url("example.com").as_str(),
            "https://api.example.com/v2/urls-by-domain?domain=example.com"
        );
        assert_eq!(
            client.request_url("https://a.example/x?y=1").as_str(),
            "https://api.example.com/v2/urls-by-domain?domain=https%3A%2F%2Fa.example%2Fx%3Fy%3D1"
        );
    }

    #[test]
    fn request_url_keeps_existing_query() {
        let client = client_for("https://api.example.com/search?v=2");
        assert_eq!(
            client.request_url("example.com").as_str(),
            "https://api.example.com/search?v=2&domain=example.com"
        );
    }

    #[test]
    fn timeouts_default_to_libcurl() {
        let client = client_for("https://api.example.com/");
        assert!(client.connect_timeout.is_none());
        assert!(client.timeout.is_none());

        let cfg = SubrockConfig {
            connect_timeout_secs: 3,
            timeout_secs: 30,
            ..SubrockConfig::default()
        };
        let client = CurlClient::from_config(&cfg).unwrap();
        assert_eq!(client.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(client.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let cfg = SubrockConfig {
            api_endpoint: "not a url".to_string(),
            ..SubrockConfig::default()
        };
        let err = CurlClient::from_config(&cfg).unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint(_)));
    }
}
