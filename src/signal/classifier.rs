//! Movement classification

use rust_decimal::Decimal;

use super::juice::juice_lean;
use super::types::{Direction, LineLabel, Signal};
use crate::config::{ClassifierConfig, Polarity};
use crate::snapshot::MarketSnapshot;

/// Direction implied by a movement's sign under a polarity
pub fn direction_for(movement: Decimal, polarity: Polarity) -> Direction {
    if movement.is_zero() {
        return Direction::None;
    }

    let falling = movement.is_sign_negative();
    match (polarity, falling) {
        (Polarity::Price, true) => Direction::Steam,
        (Polarity::Price, false) => Direction::Drift,
        (Polarity::Line, true) => Direction::UnderPressure,
        (Polarity::Line, false) => Direction::OverPressure,
    }
}

/// Label for a movement that must strictly exceed `threshold`
pub fn label_for(movement: Decimal, threshold: Decimal) -> LineLabel {
    if movement.abs() <= threshold {
        LineLabel::None
    } else if movement.is_sign_negative() {
        LineLabel::LineDrop
    } else {
        LineLabel::LineRise
    }
}

/// Turns snapshots into signals
///
/// Direction depends only on the sign of the movement and the kind's
/// configured polarity. The line label and the juice lean are separate
/// overlays and never change the direction.
#[derive(Debug, Clone, Default)]
pub struct MovementClassifier {
    config: ClassifierConfig,
}

impl MovementClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ClassifierConfig::default())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one snapshot
    ///
    /// A snapshot without movement yields a quiet signal and the juice lean
    /// is not evaluated.
    pub fn classify(&self, snapshot: &MarketSnapshot) -> Signal {
        let mut signal = Signal::quiet(snapshot.key.clone(), snapshot.kind);

        let Some(movement) = snapshot.movement else {
            return signal;
        };

        let polarity = self.config.polarity.for_kind(snapshot.kind);
        signal.direction = direction_for(movement, polarity);
        signal.magnitude = Some(movement.abs());

        if let Some(threshold) = self.config.label_threshold(snapshot.kind) {
            signal.label = label_for(movement, threshold);
        }

        if let (Some(threshold), Some(quote)) =
            (self.config.juice_threshold(snapshot.kind), snapshot.juice.as_ref())
        {
            signal.juice_lean = Some(juice_lean(quote, threshold));
        }

        signal
    }
}
