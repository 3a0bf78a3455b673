//! Signal types

use crate::market::{MarketKind, SelectionKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sign-only reading of a movement under the kind's polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Price shortening (sharp money on this side)
    Steam,
    /// Price lengthening (lack of action or bad news)
    Drift,
    /// Line dropping toward a lower-scoring expectation
    UnderPressure,
    /// Line rising toward a higher-scoring expectation
    OverPressure,
    /// No movement, or no data
    None,
}

impl Direction {
    pub fn is_none(&self) -> bool {
        *self == Direction::None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Steam => "steam",
            Direction::Drift => "drift",
            Direction::UnderPressure => "under_pressure",
            Direction::OverPressure => "over_pressure",
            Direction::None => "none",
        }
    }
}

/// Magnitude-gated overlay on top of the direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineLabel {
    None,
    LineDrop,
    LineRise,
}

impl LineLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineLabel::None => "none",
            LineLabel::LineDrop => "line_drop",
            LineLabel::LineRise => "line_rise",
        }
    }
}

/// Lean implied by how the bookmaker spreads the vig over a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JuiceLean {
    /// Over priced shorter than under by more than the threshold
    Over,
    /// Under priced shorter than over by more than the threshold
    Under,
    Neutral,
}

impl JuiceLean {
    pub fn as_str(&self) -> &'static str {
        match self {
            JuiceLean::Over => "over",
            JuiceLean::Under => "under",
            JuiceLean::Neutral => "neutral",
        }
    }
}

/// Classification attached to a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub key: SelectionKey,
    pub kind: MarketKind,
    pub direction: Direction,
    pub label: LineLabel,
    /// Absolute movement; null when the snapshot has no movement
    pub magnitude: Option<Decimal>,
    /// Secondary signal, independent of line movement. Null when there is
    /// no movement data or no juice quote.
    pub juice_lean: Option<JuiceLean>,
}

impl Signal {
    /// Signal for a snapshot with nothing to say
    pub fn quiet(key: SelectionKey, kind: MarketKind) -> Self {
        Self {
            key,
            kind,
            direction: Direction::None,
            label: LineLabel::None,
            magnitude: None,
            juice_lean: None,
        }
    }

    /// Whether the label escalated past the magnitude threshold
    pub fn is_labelled(&self) -> bool {
        self.label != LineLabel::None
    }

    /// Whether the juice lean points somewhere
    pub fn has_lean(&self) -> bool {
        matches!(self.juice_lean, Some(JuiceLean::Over | JuiceLean::Under))
    }
}
