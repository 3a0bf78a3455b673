//! Market snapshot module
//!
//! Reduces per-series reading histories to open/current/movement
//! snapshots, rounding movement once at construction.

mod normalizer;
mod types;

pub use normalizer::{round_to_tick, SnapshotNormalizer};
pub use types::MarketSnapshot;
