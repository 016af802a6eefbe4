//! Single-shot HTTP page loading.
//! Gated behind the "fetch" feature flag.

use crate::error::FetchError;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

/// Configuration for page fetching.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User-Agent header.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("plainview/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// GET `url` once and return the body as text. No retries.
pub fn fetch_html(url: &str, config: &FetchConfig) -> Result<String, FetchError> {
    let parsed_url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let response = client
        .get(parsed_url.as_str())
        .send()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let html = response
        .text()
        .map_err(|e| FetchError::Network(e.to_string()))?;
    log::info!("fetched {} ({} bytes)", parsed_url, html.len());

    Ok(html)
}
