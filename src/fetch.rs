use async_trait::async_trait;
use tracing::debug;

use crate::error::{InjectError, Result};
use crate::manifest::Manifest;

/// Retrieves phase manifests. [`HttpManifestFetcher`] is the real
/// transport; tests substitute an in-memory source.
#[async_trait]
pub trait ManifestFetcher: Send + Sync {
    async fn fetch_manifest(&self, url: &str) -> Result<Manifest>;
}

/// One-shot GET-and-parse fetcher. No retry, no caching, no validation
/// beyond the Manifest schema itself.
pub struct HttpManifestFetcher {
    client: reqwest::Client,
}

impl HttpManifestFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (proxies, headers, etc.).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpManifestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestFetcher for HttpManifestFetcher {
    async fn fetch_manifest(&self, url: &str) -> Result<Manifest> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| InjectError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(InjectError::fetch_status(url, status));
        }

        let body = response.text().await.map_err(|source| InjectError::Fetch {
            url: url.to_string(),
            source,
        })?;
        let manifest: Manifest =
            serde_json::from_str(&body).map_err(|source| InjectError::Parse {
                url: url.to_string(),
                source,
            })?;
        debug!(url, entries = manifest.len(), "manifest fetched");
        Ok(manifest)
    }
}
