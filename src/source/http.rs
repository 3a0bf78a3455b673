//! HTTP reading source

use super::{ReadingSource, SourceError};
use crate::market::SlateReadings;
use async_trait::async_trait;
use std::time::Duration;

/// Fetches a slate JSON document from an HTTP endpoint
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Create a new source; `timeout` bounds each fetch
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReadingSource for HttpSource {
    async fn fetch_slate(&self) -> Result<SlateReadings, SourceError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::warn!(url = %self.url, error = %e, "Slate request failed");
            SourceError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "Slate request rejected");
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let slate: SlateReadings = serde_json::from_str(&body)?;
        tracing::debug!(
            url = %self.url,
            markets = slate.markets.len(),
            readings = slate.reading_count(),
            "Fetched slate"
        );
        Ok(slate)
    }

    fn name(&self) -> &str {
        "http"
    }
}
