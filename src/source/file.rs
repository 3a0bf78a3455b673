//! JSON file reading source

use super::{ReadingSource, SourceError};
use crate::market::SlateReadings;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads a slate JSON document from disk on every fetch
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl ReadingSource for JsonFileSource {
    async fn fetch_slate(&self) -> Result<SlateReadings, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|source| {
            tracing::warn!(path = ?self.path, error = %source, "Slate file read failed");
            SourceError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        let slate: SlateReadings = serde_json::from_str(&content)?;
        tracing::debug!(
            path = ?self.path,
            markets = slate.markets.len(),
            readings = slate.reading_count(),
            "Loaded slate file"
        );
        Ok(slate)
    }

    fn name(&self) -> &str {
        "file"
    }
}
