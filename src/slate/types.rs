//! Slate insight types

use crate::market::{MarketKind, SelectionKey};
use crate::signal::{Direction, JuiceLean, LineLabel, Signal};
use crate::snapshot::MarketSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A snapshot paired with its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedMarket {
    pub snapshot: MarketSnapshot,
    pub signal: Signal,
}

impl ClassifiedMarket {
    pub fn new(snapshot: MarketSnapshot, signal: Signal) -> Self {
        Self { snapshot, signal }
    }

    pub fn key(&self) -> &SelectionKey {
        &self.snapshot.key
    }

    pub fn kind(&self) -> MarketKind {
        self.snapshot.kind
    }
}

/// Agreement of total-line moves across a set of markets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalsTrend {
    /// Every move strictly negative
    AllUnder,
    /// Every move strictly positive
    AllOver,
    /// Anything else, including no moves and all-flat
    Mixed,
}

impl TotalsTrend {
    /// Fold a set of movements into a trend
    pub fn from_movements(movements: impl IntoIterator<Item = Decimal>) -> Self {
        let mut seen = false;
        let mut all_under = true;
        let mut all_over = true;

        for movement in movements {
            seen = true;
            all_under &= movement < Decimal::ZERO;
            all_over &= movement > Decimal::ZERO;
        }

        match (seen, all_under, all_over) {
            (true, true, _) => TotalsTrend::AllUnder,
            (true, _, true) => TotalsTrend::AllOver,
            _ => TotalsTrend::Mixed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TotalsTrend::AllUnder => "all_under",
            TotalsTrend::AllOver => "all_over",
            TotalsTrend::Mixed => "mixed",
        }
    }
}

/// A moneyline selection ranked by how far its price moved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlMover {
    pub key: SelectionKey,
    pub game_id: String,
    pub selection_name: String,
    pub movement: Decimal,
    pub direction: Direction,
}

/// A prop whose line moved past the label threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropLineMove {
    pub key: SelectionKey,
    pub game_id: String,
    pub selection_name: String,
    pub movement: Decimal,
    pub label: LineLabel,
}

/// A line market whose vig leans to one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeanEntry {
    pub key: SelectionKey,
    pub kind: MarketKind,
    pub game_id: String,
    pub selection_name: String,
    pub lean: JuiceLean,
}

/// Per-game rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInsight {
    pub game_id: String,
    /// Largest moneyline move in the game
    pub biggest_ml_mover: Option<MlMover>,
    /// Signed sum of total-line moves; null when no total has data
    pub total_movement: Option<Decimal>,
    pub totals_trend: TotalsTrend,
    pub steam_count: usize,
    pub drift_count: usize,
    pub props_with_movement: usize,
}

/// Slate-level rollup of one fetch cycle
///
/// Recomputed from scratch every cycle; identical input always produces an
/// identical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlateInsights {
    /// Largest moneyline moves first, capped at the display bound
    pub biggest_ml_movers: Vec<MlMover>,
    pub totals_trend: TotalsTrend,
    /// Signed sum of total-line moves; negative means net under pressure
    pub total_points_dropped: Decimal,
    pub totals_under_moves: usize,
    pub totals_over_moves: usize,
    /// Props whose movement is strictly non-zero
    pub props_with_movement: usize,
    pub prop_line_moves: Vec<PropLineMove>,
    pub juice_leans: Vec<LeanEntry>,
    /// Ordered by game id
    pub games: Vec<GameInsight>,
}

impl Default for SlateInsights {
    fn default() -> Self {
        Self {
            biggest_ml_movers: Vec::new(),
            totals_trend: TotalsTrend::Mixed,
            total_points_dropped: Decimal::ZERO,
            totals_under_moves: 0,
            totals_over_moves: 0,
            props_with_movement: 0,
            prop_line_moves: Vec::new(),
            juice_leans: Vec::new(),
            games: Vec::new(),
        }
    }
}
