//! Signal classification module
//!
//! Classifies snapshot movement into direction, line label and juice lean

mod classifier;
mod juice;
mod types;

pub use classifier::{direction_for, label_for, MovementClassifier};
pub use juice::juice_lean;
pub use types::{Direction, JuiceLean, LineLabel, Signal};
