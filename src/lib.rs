//! odds-movement: odds-movement signal engine for basketball markets
//!
//! This library provides the core components for:
//! - Normalizing raw odds readings into per-selection snapshots
//! - Classifying movement into steam/drift, line pressure and juice leans
//! - Aggregating a slate into movers, totals trends and per-game insights
//! - Reading sources (memory, JSON file, HTTP) and a refresh pipeline
//! - Logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod market;
pub mod signal;
pub mod slate;
pub mod snapshot;
pub mod source;
pub mod telemetry;

pub use market::{Market, MarketId, MarketKind, OddsReading, SlateReadings};
pub use slate::{compute_slate_view, SlatePipeline, SlateView};
