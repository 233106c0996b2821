//! HTTP download of rendered QR images.

use std::time::Duration;

use anyhow::{Context, Result};
use campaignkit_core::LoadedImage;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct ImageFetcher {
    http: reqwest::Client,
}

impl ImageFetcher {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("campaignkit/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http })
    }

    /// GET `url` and return the body as an image to export.
    pub async fn fetch(&self, url: &str) -> Result<LoadedImage> {
        tracing::debug!(%url, "fetching QR image");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach QR service at {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("QR service returned {}", status);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read QR image")?;

        Ok(LoadedImage {
            bytes: bytes.to_vec(),
        })
    }
}
