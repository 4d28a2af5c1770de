//! Public IP resolution over a shuffled list of checkip endpoints.

use crate::config::default_checkip_urls;
use crate::error::{DynipError, Result};
use rand::seq::SliceRandom;
use regex::Regex;
use std::time::Duration;

/// Four dot-separated groups of one to three digits. Octets are not
/// range-checked, so `999.999.999.999` matches.
const IP_PATTERN: &str = r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}";

/// Resolves the caller's public IPv4 address.
pub struct IpResolver {
    client: reqwest::Client,
    urls: Vec<String>,
    pattern: Regex,
}

impl IpResolver {
    /// Resolver over the built-in checkip endpoints with a 5 second timeout.
    pub fn new() -> Result<Self> {
        Self::with_urls(default_checkip_urls(), Duration::from_secs(5))
    }

    /// Resolver over custom endpoints.
    pub fn with_urls(urls: Vec<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let pattern = Regex::new(IP_PATTERN).map_err(|e| DynipError::Config(e.to_string()))?;

        Ok(Self {
            client,
            urls,
            pattern,
        })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Try every endpoint once, in random order, until one yields an IP.
    pub async fn resolve_current_ip(&self) -> Result<String> {
        for url in self.shuffled_urls() {
            match self.try_endpoint(&url).await {
                Ok(ip) => {
                    tracing::debug!("Resolved IP {} from {}", ip, url);
                    return Ok(ip);
                }
                Err(e) => {
                    tracing::debug!("failed checkip from {}: {}", url, e);
                }
            }
        }

        Err(DynipError::Resolution("could not get IP".to_string()))
    }

    fn shuffled_urls(&self) -> Vec<String> {
        let mut urls = self.urls.clone();
        urls.shuffle(&mut rand::thread_rng());
        urls
    }

    async fn try_endpoint(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        self.extract_ip(&body)
            .ok_or_else(|| DynipError::Network(format!("no IP address in response from {}", url)))
    }

    /// First IP-looking substring of `body`.
    pub fn extract_ip(&self, body: &str) -> Option<String> {
        self.pattern.find(body).map(|m| m.as_str().to_string())
    }
}
