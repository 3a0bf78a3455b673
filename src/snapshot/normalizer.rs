//! Market snapshot normalizer
//!
//! Reduces the reading history of one tracked series to an
//! open/current/movement snapshot.

use rust_decimal::{Decimal, RoundingStrategy};

use super::types::MarketSnapshot;
use crate::config::NormalizerConfig;
use crate::market::{OddsReading, Selection};

/// Round a value to the nearest multiple of `tick`, half away from zero
///
/// A rounded zero always comes back as positive zero so repeated
/// computation is bit-identical. `None` when the result does not fit in a
/// `Decimal`.
pub fn round_to_tick(value: Decimal, tick: Decimal) -> Option<Decimal> {
    if tick <= Decimal::ZERO {
        return Some(value);
    }

    let steps = value
        .checked_div(tick)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let mut rounded = steps.checked_mul(tick)?;
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    Some(rounded)
}

/// Builds snapshots from raw readings
#[derive(Debug, Clone, Default)]
pub struct SnapshotNormalizer {
    config: NormalizerConfig,
}

impl SnapshotNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizer with the default ticks (0.01 odds, 0.1 points)
    pub fn with_defaults() -> Self {
        Self::new(NormalizerConfig::default())
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Reduce readings to a snapshot for `selection`
    ///
    /// Readings that do not belong to the selection are skipped, and the
    /// input does not need to be time ordered. Earliest reading wins on
    /// ties for `open`, latest for `current`. Never fails: no readings
    /// yields an all-null snapshot.
    pub fn normalize(&self, selection: &Selection, readings: &[OddsReading]) -> MarketSnapshot {
        let mut snapshot = MarketSnapshot::empty(selection);

        let mut open: Option<&OddsReading> = None;
        let mut current: Option<&OddsReading> = None;

        for reading in readings.iter().filter(|r| selection.key.matches(r)) {
            snapshot.reading_count += 1;

            if open.map_or(true, |o| reading.recorded_at < o.recorded_at) {
                open = Some(reading);
            }
            if current.map_or(true, |c| reading.recorded_at >= c.recorded_at) {
                current = Some(reading);
            }
        }

        let skipped = readings.len() - snapshot.reading_count;
        if skipped > 0 {
            tracing::trace!(
                key = %selection.key,
                skipped,
                "Ignored readings for other series"
            );
        }

        if let (Some(open), Some(current)) = (open, current) {
            let tick = self.config.tick_for(selection.kind);
            snapshot.open = Some(open.value);
            snapshot.current = Some(current.value);
            snapshot.movement = current
                .value
                .checked_sub(open.value)
                .and_then(|raw| round_to_tick(raw, tick));
            if snapshot.movement.is_none() {
                tracing::warn!(key = %selection.key, "Movement out of range, leaving it unset");
            }
        }

        snapshot
    }
}
