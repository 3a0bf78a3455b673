//! Market model
//!
//! Tagged market descriptors, the sides they quote, and the selections a
//! snapshot tracks.

mod reading;

pub use reading::{MarketReadings, OddsReading, SlateReadings};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque market identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(String);

impl MarketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MarketId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MarketId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Side of a market a reading was quoted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
    Over,
    Under,
}

/// Market kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketKind {
    /// Head-to-head decimal price
    Moneyline,
    /// Game total points line
    Total,
    /// Player prop line
    Prop,
}

impl MarketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketKind::Moneyline => "moneyline",
            MarketKind::Total => "total",
            MarketKind::Prop => "prop",
        }
    }
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current decimal odds on both sides of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuiceQuote {
    pub over_odds: Decimal,
    pub under_odds: Decimal,
}

impl JuiceQuote {
    pub fn new(over_odds: Decimal, under_odds: Decimal) -> Self {
        Self {
            over_odds,
            under_odds,
        }
    }

    /// Over price minus under price; `None` on overflow
    pub fn spread(&self) -> Option<Decimal> {
        self.over_odds.checked_sub(self.under_odds)
    }
}

/// A tracked market
///
/// Each variant carries only the fields its kind needs. Moneylines are
/// priced per side; totals and props quote a single line shared by both
/// sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Market {
    Moneyline {
        id: MarketId,
        game_id: String,
        home: String,
        away: String,
    },
    Total {
        id: MarketId,
        game_id: String,
        #[serde(default)]
        juice: Option<JuiceQuote>,
    },
    Prop {
        id: MarketId,
        game_id: String,
        player: String,
        stat: String,
        #[serde(default)]
        juice: Option<JuiceQuote>,
    },
}

impl Market {
    pub fn id(&self) -> &MarketId {
        match self {
            Self::Moneyline { id, .. } | Self::Total { id, .. } | Self::Prop { id, .. } => id,
        }
    }

    pub fn game_id(&self) -> &str {
        match self {
            Self::Moneyline { game_id, .. }
            | Self::Total { game_id, .. }
            | Self::Prop { game_id, .. } => game_id,
        }
    }

    pub fn kind(&self) -> MarketKind {
        match self {
            Self::Moneyline { .. } => MarketKind::Moneyline,
            Self::Total { .. } => MarketKind::Total,
            Self::Prop { .. } => MarketKind::Prop,
        }
    }

    /// Selections this market contributes to a slate
    ///
    /// Moneylines yield one selection per side, named after the team.
    /// Line markets yield a single side-less selection.
    pub fn selections(&self) -> Vec<Selection> {
        match self {
            Self::Moneyline {
                id,
                game_id,
                home,
                away,
            } => vec![
                Selection {
                    key: SelectionKey::side(id.clone(), Side::Home),
                    kind: MarketKind::Moneyline,
                    game_id: game_id.clone(),
                    name: home.clone(),
                    juice: None,
                },
                Selection {
                    key: SelectionKey::side(id.clone(), Side::Away),
                    kind: MarketKind::Moneyline,
                    game_id: game_id.clone(),
                    name: away.clone(),
                    juice: None,
                },
            ],
            Self::Total { id, game_id, juice } => vec![Selection {
                key: SelectionKey::line(id.clone()),
                kind: MarketKind::Total,
                game_id: game_id.clone(),
                name: format!("{game_id} total"),
                juice: *juice,
            }],
            Self::Prop {
                id,
                game_id,
                player,
                stat,
                juice,
            } => vec![Selection {
                key: SelectionKey::line(id.clone()),
                kind: MarketKind::Prop,
                game_id: game_id.clone(),
                name: format!("{player} {stat}"),
                juice: *juice,
            }],
        }
    }
}

/// Identity of one tracked series: a market plus, for per-side markets,
/// the side
///
/// Ordering is by market id then side, with side-less keys first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectionKey {
    pub market_id: MarketId,
    pub side: Option<Side>,
}

impl SelectionKey {
    /// Key for one side of a per-side market
    pub fn side(market_id: MarketId, side: Side) -> Self {
        Self {
            market_id,
            side: Some(side),
        }
    }

    /// Key for a line market, where both sides share the line
    pub fn line(market_id: MarketId) -> Self {
        Self {
            market_id,
            side: None,
        }
    }

    /// Whether a reading belongs to this series
    pub fn matches(&self, reading: &OddsReading) -> bool {
        reading.market_id == self.market_id
            && self.side.map_or(true, |side| side == reading.side)
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Some(side) => write!(f, "{}:{:?}", self.market_id, side),
            None => write!(f, "{}", self.market_id),
        }
    }
}

/// What a single snapshot tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub key: SelectionKey,
    pub kind: MarketKind,
    pub game_id: String,
    /// Display name (team for moneylines, "player stat" for props)
    pub name: String,
    pub juice: Option<JuiceQuote>,
}

impl Selection {
    /// Build a selection directly, outside of a `Market`
    pub fn new(
        key: SelectionKey,
        kind: MarketKind,
        game_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            key,
            kind,
            game_id: game_id.into(),
            name: name.into(),
            juice: None,
        }
    }

    pub fn with_juice(mut self, juice: JuiceQuote) -> Self {
        self.juice = Some(juice);
        self
    }
}
