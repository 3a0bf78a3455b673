//! Juice-lean heuristic

use super::types::JuiceLean;
use crate::market::JuiceQuote;
use rust_decimal::Decimal;

/// Lean implied by the over/under price gap
///
/// `over - under` below `-threshold` means the over is the favoured side;
/// above `threshold` means the under is. Both bounds are strict.
pub fn juice_lean(quote: &JuiceQuote, threshold: Decimal) -> JuiceLean {
    let Some(spread) = quote.spread() else {
        return JuiceLean::Neutral;
    };
    if spread < -threshold {
        JuiceLean::Over
    } else if spread > threshold {
        JuiceLean::Under
    } else {
        JuiceLean::Neutral
    }
}
