//! Reading source module
//!
//! Boundary to the external store that holds raw odds readings. The core
//! fetches once per cycle and never retries or caches.

mod file;
mod http;
mod memory;

pub use file::JsonFileSource;
pub use http::HttpSource;
pub use memory::MemorySource;

use crate::config::{SourceConfig, SourceKind};
use crate::market::{MarketId, OddsReading, SlateReadings};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Reading source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// Slate document could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Slate document is not valid slate JSON
    #[error("Failed to parse slate: {0}")]
    Parse(#[from] serde_json::Error),
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),
    /// Source is down
    #[error("Reading source unavailable: {0}")]
    Unavailable(String),
}

/// Trait for reading source implementations
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Fetch every market on the slate with its readings
    async fn fetch_slate(&self) -> Result<SlateReadings, SourceError>;

    /// Fetch readings for one market
    ///
    /// Markets without data yet return an empty vector.
    async fn fetch_readings(&self, market_id: &MarketId) -> Result<Vec<OddsReading>, SourceError> {
        Ok(self.fetch_slate().await?.readings_for(market_id))
    }

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Build the source described by configuration
pub fn from_config(config: &SourceConfig) -> anyhow::Result<Box<dyn ReadingSource>> {
    match config.kind {
        SourceKind::File => Ok(Box::new(JsonFileSource::new(config.path.clone()))),
        SourceKind::Http => {
            let url = config
                .url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("source.url is required for the http source"))?;
            let source = HttpSource::new(url, Duration::from_secs(config.timeout_secs))?;
            Ok(Box::new(source))
        }
    }
}
