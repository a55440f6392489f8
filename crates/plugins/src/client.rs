// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::RegistryError;
use diagnostics::*;
use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str = "https://rubygems.org";
const TIMEOUT_SECONDS: u64 = 60;

/// Async RubyGems API client
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a client for the registry at `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, Duration::from_secs(TIMEOUT_SECONDS))
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("litasite/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Client {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the names of all gems that depend on `host` at runtime
    pub async fn fetch_reverse_dependencies(&self, host: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.reverse_dependencies_url(host);
        let value = self.get_json(&url).await?;

        serde_json::from_value(value.clone()).map_err(|source| RegistryError::Decode {
            url,
            payload: value.to_string(),
            source,
        })
    }

    /// Fetch the raw registry payload for one gem
    pub async fn fetch_gem(&self, name: &str) -> Result<serde_json::Value, RegistryError> {
        let url = self.gem_url(name);
        self.get_json(&url).await
    }

    /// GET `url` and decode the body as JSON
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value, RegistryError> {
        debug!("GET {url}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|source| RegistryError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| RegistryError::Network {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(RegistryError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| RegistryError::Decode {
            url: url.to_string(),
            payload: body,
            source,
        })
    }

    // URL construction helpers
    fn combine(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    fn reverse_dependencies_url(&self, host: &str) -> String {
        self.combine(&format!("gems/{}/reverse_dependencies.json", host))
    }

    fn gem_url(&self, name: &str) -> String {
        self.combine(&format!("gems/{}.json", name))
    }
}
