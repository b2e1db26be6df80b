use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::{DeviceEntry, PortsFeed, StatsFeed};

const DEVICES_URL: &str =
    "https://raw.githubusercontent.com/PortsMaster/PortMaster-Info/main/devices.json";
const PORTS_URL: &str =
    "https://raw.githubusercontent.com/PortsMaster/PortMaster-Info/main/ports.json";
const STATS_URL: &str =
    "https://raw.githubusercontent.com/PortsMaster/PortMaster-Info/main/port_stats.json";

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    RequestFailed(String),

    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;

/// Where the three feeds live. Overridable for mirrors and for tests.
#[derive(Debug, Clone)]
pub struct FeedUrls {
    pub devices: String,
    pub ports: String,
    pub stats: String,
}

impl Default for FeedUrls {
    fn default() -> Self {
        Self {
            devices: DEVICES_URL.to_string(),
            ports: PORTS_URL.to_string(),
            stats: STATS_URL.to_string(),
        }
    }
}

/// Client for the read-only PortMaster JSON feeds.
///
/// All three feeds are plain unauthenticated GETs. A non-2xx response is a
/// hard failure for that call; there is no retry. The caller decides how to
/// degrade.
pub struct FeedClient {
    client: reqwest::Client,
    urls: FeedUrls,
}

impl FeedClient {
    pub fn new() -> Self {
        Self::with_urls(FeedUrls::default())
    }

    pub fn with_urls(urls: FeedUrls) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("PortScout/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, urls }
    }

    /// Fetch the device directory: device code -> name/manufacturer.
    pub async fn fetch_devices(&self) -> Result<BTreeMap<String, DeviceEntry>> {
        self.fetch_json(&self.urls.devices).await
    }

    /// Fetch the port catalog.
    pub async fn fetch_ports(&self) -> Result<PortsFeed> {
        self.fetch_json(&self.urls.ports).await
    }

    /// Fetch the download counters.
    pub async fn fetch_stats(&self) -> Result<StatsFeed> {
        self.fetch_json(&self.urls.stats).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "fetching feed");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::RequestFailed(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls_point_at_portmaster_info() {
        let urls = FeedUrls::default();
        assert!(urls.devices.ends_with("devices.json"));
        assert!(urls.ports.ends_with("ports.json"));
        assert!(urls.stats.ends_with("port_stats.json"));
    }

    #[test]
    fn client_uses_custom_urls() {
        let urls = FeedUrls {
            devices: "http://localhost:9999/devices.json".into(),
            ports: "http://localhost:9999/ports.json".into(),
            stats: "http://localhost:9999/stats.json".into(),
        };
        let client = FeedClient::with_urls(urls);
        assert!(client.urls.ports.starts_with("http://localhost"));
    }
}
