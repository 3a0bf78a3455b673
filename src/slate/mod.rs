//! Slate module
//!
//! Aggregates classified markets into slate insights and wires the
//! normalize, classify and aggregate stages into one pipeline.

mod aggregator;
mod pipeline;
mod types;

pub use aggregator::SlateAggregator;
pub use pipeline::{aggregate, classify, compute_slate_view, normalize, SlatePipeline, SlateView};
pub use types::{
    ClassifiedMarket, GameInsight, LeanEntry, MlMover, PropLineMove, SlateInsights, TotalsTrend,
};
