//! Slate pipeline
//!
//! Runs normalize, classify and aggregate over every selection of a slate.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::aggregator::{canonical, SlateAggregator};
use super::types::{ClassifiedMarket, SlateInsights};
use crate::config::Config;
use crate::market::{OddsReading, SlateReadings, Selection};
use crate::signal::{MovementClassifier, Signal};
use crate::snapshot::{MarketSnapshot, SnapshotNormalizer};
use crate::source::{ReadingSource, SourceError};
use crate::telemetry::{
    increment_counter, record_latency, set_gauge, CounterMetric, GaugeMetric, LatencyMetric,
};

/// Full output of one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlateView {
    /// One per selection, ordered by key
    pub snapshots: Vec<MarketSnapshot>,
    /// Parallel to `snapshots`
    pub signals: Vec<Signal>,
    pub insights: SlateInsights,
}

impl SlateView {
    /// Snapshot and signal pairs in key order
    pub fn markets(&self) -> impl Iterator<Item = (&MarketSnapshot, &Signal)> {
        self.snapshots.iter().zip(self.signals.iter())
    }
}

/// The three stages wired together
///
/// Holds configuration only, so one pipeline can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct SlatePipeline {
    normalizer: SnapshotNormalizer,
    classifier: MovementClassifier,
    aggregator: SlateAggregator,
}

impl SlatePipeline {
    pub fn new(
        normalizer: SnapshotNormalizer,
        classifier: MovementClassifier,
        aggregator: SlateAggregator,
    ) -> Self {
        Self {
            normalizer,
            classifier,
            aggregator,
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SnapshotNormalizer::new(config.normalizer.clone()),
            MovementClassifier::new(config.classifier.clone()),
            SlateAggregator::new(config.aggregator.clone()),
        )
    }

    pub fn normalize(&self, selection: &Selection, readings: &[OddsReading]) -> MarketSnapshot {
        self.normalizer.normalize(selection, readings)
    }

    pub fn classify(&self, snapshot: &MarketSnapshot) -> Signal {
        self.classifier.classify(snapshot)
    }

    pub fn aggregate(&self, markets: &[ClassifiedMarket]) -> SlateInsights {
        self.aggregator.aggregate(markets)
    }

    /// Normalize and classify every selection of the slate, in key order
    pub fn classify_slate(&self, slate: &SlateReadings) -> Vec<ClassifiedMarket> {
        let mut markets: Vec<ClassifiedMarket> = slate
            .markets
            .iter()
            .flat_map(|entry| {
                entry.market.selections().into_iter().map(move |selection| {
                    let snapshot = self.normalize(&selection, &entry.readings);
                    let signal = self.classify(&snapshot);
                    ClassifiedMarket::new(snapshot, signal)
                })
            })
            .collect();

        markets.sort_by(canonical);
        markets
    }

    /// Compute the full view for one slate
    pub fn compute_slate_view(&self, slate: &SlateReadings) -> SlateView {
        let start = Instant::now();

        let markets = self.classify_slate(slate);
        let insights = self.aggregate(&markets);

        let (snapshots, signals): (Vec<_>, Vec<_>) = markets
            .into_iter()
            .map(|m| (m.snapshot, m.signal))
            .unzip();

        let view = SlateView {
            snapshots,
            signals,
            insights,
        };

        record_latency(LatencyMetric::SlateView, start.elapsed());
        record_view(slate, &view);

        tracing::debug!(
            markets = slate.markets.len(),
            readings = slate.reading_count(),
            selections = view.snapshots.len(),
            props_with_movement = view.insights.props_with_movement,
            totals_trend = view.insights.totals_trend.as_str(),
            "Computed slate view"
        );

        view
    }

    /// Fetch the slate from `source` and compute its view
    ///
    /// A failed fetch is returned as is; no earlier view is substituted.
    pub async fn refresh(&self, source: &dyn ReadingSource) -> Result<SlateView, SourceError> {
        let start = Instant::now();
        let slate = match source.fetch_slate().await {
            Ok(slate) => slate,
            Err(e) => {
                increment_counter(CounterMetric::SourceErrors, 1);
                tracing::warn!(source = source.name(), error = %e, "Slate fetch failed");
                return Err(e);
            }
        };
        record_latency(LatencyMetric::SourceFetch, start.elapsed());

        Ok(self.compute_slate_view(&slate))
    }
}

fn record_view(slate: &SlateReadings, view: &SlateView) {
    increment_counter(CounterMetric::Cycles, 1);
    increment_counter(CounterMetric::ReadingsProcessed, slate.reading_count() as u64);

    let moving = view.snapshots.iter().filter(|s| s.has_data()).count();
    let points = view
        .insights
        .total_points_dropped
        .to_f64()
        .unwrap_or_default();

    set_gauge(GaugeMetric::Selections, view.snapshots.len() as f64);
    set_gauge(GaugeMetric::MovingSelections, moving as f64);
    set_gauge(
        GaugeMetric::PropsWithMovement,
        view.insights.props_with_movement as f64,
    );
    set_gauge(GaugeMetric::TotalPointsMoved, points);
}

/// Normalize with default ticks
pub fn normalize(selection: &Selection, readings: &[OddsReading]) -> MarketSnapshot {
    SnapshotNormalizer::with_defaults().normalize(selection, readings)
}

/// Classify with default thresholds and polarity
pub fn classify(snapshot: &MarketSnapshot) -> Signal {
    MovementClassifier::with_defaults().classify(snapshot)
}

/// Aggregate with the default movers limit
pub fn aggregate(markets: &[ClassifiedMarket]) -> SlateInsights {
    SlateAggregator::with_defaults().aggregate(markets)
}

/// Compute a slate view with default configuration
pub fn compute_slate_view(slate: &SlateReadings) -> SlateView {
    SlatePipeline::with_defaults().compute_slate_view(slate)
}
