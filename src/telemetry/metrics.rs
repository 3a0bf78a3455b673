//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Reading source fetch
    SourceFetch,
    /// Full normalize, classify and aggregate pass
    SlateView,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Completed refresh cycles
    Cycles,
    /// Refresh cycles skipped because the source failed
    SourceErrors,
    /// Readings consumed across all cycles
    ReadingsProcessed,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Selections in the last slate view
    Selections,
    /// Selections with a non-null movement
    MovingSelections,
    /// Props that moved in the last slate view
    PropsWithMovement,
    /// Summed total movement in points
    TotalPointsMoved,
}

fn latency_name(metric: LatencyMetric) -> &'static str {
    match metric {
        LatencyMetric::SourceFetch => "odds_movement_source_fetch_ms",
        LatencyMetric::SlateView => "odds_movement_slate_view_ms",
    }
}

fn counter_name(metric: CounterMetric) -> &'static str {
    match metric {
        CounterMetric::Cycles => "odds_movement_cycles_total",
        CounterMetric::SourceErrors => "odds_movement_source_errors_total",
        CounterMetric::ReadingsProcessed => "odds_movement_readings_processed_total",
    }
}

fn gauge_name(metric: GaugeMetric) -> &'static str {
    match metric {
        GaugeMetric::Selections => "odds_movement_selections",
        GaugeMetric::MovingSelections => "odds_movement_moving_selections",
        GaugeMetric::PropsWithMovement => "odds_movement_props_with_movement",
        GaugeMetric::TotalPointsMoved => "odds_movement_total_points_moved",
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = latency_name(metric);
    ::metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1000.0);
    tracing::trace!(
        metric = metric_name,
        value_ms = duration.as_millis() as u64,
        "Recording latency"
    );
}

/// Increment a counter
pub fn increment_counter(metric: CounterMetric, value: u64) {
    ::metrics::counter!(counter_name(metric)).increment(value);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = gauge_name(metric);
    ::metrics::gauge!(metric_name).set(value);
    tracing::trace!(metric = metric_name, value = value, "Setting gauge");
}
