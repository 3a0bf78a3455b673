//! Raw odds readings

use super::{Market, MarketId, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One sampled price or line for one side of a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsReading {
    pub market_id: MarketId,
    pub side: Side,
    /// Decimal odds for moneylines, the line for totals and props
    pub value: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl OddsReading {
    pub fn new(
        market_id: impl Into<MarketId>,
        side: Side,
        value: Decimal,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            market_id: market_id.into(),
            side,
            value,
            recorded_at,
        }
    }
}

/// A market together with every reading available for it this cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReadings {
    pub market: Market,
    #[serde(default)]
    pub readings: Vec<OddsReading>,
}

impl MarketReadings {
    pub fn new(market: Market, readings: Vec<OddsReading>) -> Self {
        Self { market, readings }
    }
}

/// Raw readings for every market on the slate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlateReadings {
    #[serde(default)]
    pub markets: Vec<MarketReadings>,
}

impl SlateReadings {
    pub fn new(markets: Vec<MarketReadings>) -> Self {
        Self { markets }
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    /// Total readings across the slate
    pub fn reading_count(&self) -> usize {
        self.markets.iter().map(|m| m.readings.len()).sum()
    }

    /// Readings for a single market, empty when the market is unknown
    pub fn readings_for(&self, market_id: &MarketId) -> Vec<OddsReading> {
        self.markets
            .iter()
            .filter(|m| m.market.id() == market_id)
            .flat_map(|m| m.readings.iter().cloned())
            .collect()
    }
}
