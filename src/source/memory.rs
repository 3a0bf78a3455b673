//! In-memory reading source

use super::{ReadingSource, SourceError};
use crate::market::SlateReadings;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Serves a slate held in memory
///
/// The slate can be swapped between fetches, or the source marked
/// unavailable, which makes it useful for embedding and tests.
#[derive(Clone)]
pub struct MemorySource {
    state: Arc<RwLock<Result<SlateReadings, String>>>,
}

impl MemorySource {
    pub fn new(slate: SlateReadings) -> Self {
        Self {
            state: Arc::new(RwLock::new(Ok(slate))),
        }
    }

    /// A source whose every fetch fails
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Err(reason.into()))),
        }
    }

    /// Replace the served slate
    pub async fn set_slate(&self, slate: SlateReadings) {
        *self.state.write().await = Ok(slate);
    }

    /// Make subsequent fetches fail
    pub async fn set_unavailable(&self, reason: impl Into<String>) {
        *self.state.write().await = Err(reason.into());
    }
}

#[async_trait]
impl ReadingSource for MemorySource {
    async fn fetch_slate(&self) -> Result<SlateReadings, SourceError> {
        match &*self.state.read().await {
            Ok(slate) => Ok(slate.clone()),
            Err(reason) => Err(SourceError::Unavailable(reason.clone())),
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}
