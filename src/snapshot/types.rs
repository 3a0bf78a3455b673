//! Snapshot types

use crate::market::{JuiceQuote, MarketId, MarketKind, Selection, SelectionKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Open/current/movement view of one tracked series
///
/// Derived on every fetch cycle, never persisted. `movement` is present
/// exactly when both `open` and `current` are; it is rounded once, when the
/// snapshot is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub key: SelectionKey,
    pub kind: MarketKind,
    pub game_id: String,
    pub selection_name: String,
    /// Value of the earliest reading
    pub open: Option<Decimal>,
    /// Value of the latest reading
    pub current: Option<Decimal>,
    /// `current - open`, rounded to the kind's tick
    pub movement: Option<Decimal>,
    /// Number of readings folded in
    pub reading_count: usize,
    pub juice: Option<JuiceQuote>,
}

impl MarketSnapshot {
    /// Snapshot for a selection with no readings yet
    pub fn empty(selection: &Selection) -> Self {
        Self {
            key: selection.key.clone(),
            kind: selection.kind,
            game_id: selection.game_id.clone(),
            selection_name: selection.name.clone(),
            open: None,
            current: None,
            movement: None,
            reading_count: 0,
            juice: selection.juice,
        }
    }

    pub fn market_id(&self) -> &MarketId {
        &self.key.market_id
    }

    /// Whether at least one reading was folded in
    pub fn has_data(&self) -> bool {
        self.movement.is_some()
    }

    /// Whether the series moved at all (strictly non-zero movement)
    pub fn has_moved(&self) -> bool {
        self.movement.is_some_and(|m| !m.is_zero())
    }

    /// Absolute movement, if any
    pub fn magnitude(&self) -> Option<Decimal> {
        self.movement.map(|m| m.abs())
    }
}
