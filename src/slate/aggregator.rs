//! Slate aggregation
//!
//! Folds classified markets into slate and per-game insights. Input order
//! never matters: markets are put in canonical order first and every ranked
//! output carries an explicit tie-break.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::types::{
    ClassifiedMarket, GameInsight, LeanEntry, MlMover, PropLineMove, SlateInsights, TotalsTrend,
};
use crate::config::AggregatorConfig;
use crate::market::MarketKind;
use crate::signal::{Direction, JuiceLean};

/// Canonical ordering of classified markets
///
/// Key first; the remaining fields only separate duplicate keys.
pub(crate) fn canonical(a: &ClassifiedMarket, b: &ClassifiedMarket) -> Ordering {
    a.snapshot
        .key
        .cmp(&b.snapshot.key)
        .then_with(|| a.snapshot.kind.cmp(&b.snapshot.kind))
        .then_with(|| a.snapshot.game_id.cmp(&b.snapshot.game_id))
        .then_with(|| a.snapshot.selection_name.cmp(&b.snapshot.selection_name))
        .then_with(|| a.snapshot.movement.cmp(&b.snapshot.movement))
        .then_with(|| a.snapshot.reading_count.cmp(&b.snapshot.reading_count))
}

/// Largest magnitude first
fn by_magnitude(a_move: Decimal, b_move: Decimal) -> Ordering {
    b_move.abs().cmp(&a_move.abs())
}

fn movers_from<'a>(markets: impl Iterator<Item = &'a ClassifiedMarket>) -> Vec<MlMover> {
    let mut movers: Vec<MlMover> = markets
        .filter(|m| m.kind() == MarketKind::Moneyline)
        .filter_map(|m| {
            m.snapshot.movement.map(|movement| MlMover {
                key: m.snapshot.key.clone(),
                game_id: m.snapshot.game_id.clone(),
                selection_name: m.snapshot.selection_name.clone(),
                movement,
                direction: m.signal.direction,
            })
        })
        .collect();

    movers.sort_by(|a, b| by_magnitude(a.movement, b.movement).then_with(|| a.key.cmp(&b.key)));
    movers
}

fn total_movements<'a>(markets: impl Iterator<Item = &'a ClassifiedMarket>) -> Vec<Decimal> {
    markets
        .filter(|m| m.kind() == MarketKind::Total)
        .filter_map(|m| m.snapshot.movement)
        .collect()
}

/// Markets sorted into canonical order
fn canonical_order(markets: &[ClassifiedMarket]) -> Vec<&ClassifiedMarket> {
    let mut ordered: Vec<&ClassifiedMarket> = markets.iter().collect();
    ordered.sort_by(|a, b| canonical(a, b));
    ordered
}

/// Signed sum, clamped to the `Decimal` range
fn sum_movements(movements: &[Decimal]) -> Decimal {
    movements
        .iter()
        .fold(Decimal::ZERO, |acc, m| acc.saturating_add(*m))
}

fn is_moving_prop(market: &ClassifiedMarket) -> bool {
    market.kind() == MarketKind::Prop && market.snapshot.has_moved()
}

/// Builds slate insights from classified markets
#[derive(Debug, Clone, Default)]
pub struct SlateAggregator {
    config: AggregatorConfig,
}

impl SlateAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(AggregatorConfig::default())
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Full moneyline ranking before the display cap
    ///
    /// Moneyline selections with movement data, largest `|movement|` first,
    /// ties broken by selection key.
    pub fn rank_ml_movers(&self, markets: &[ClassifiedMarket]) -> Vec<MlMover> {
        movers_from(canonical_order(markets).into_iter())
    }

    /// Aggregate one fetch cycle
    pub fn aggregate(&self, markets: &[ClassifiedMarket]) -> SlateInsights {
        let ordered = canonical_order(markets);

        let mut biggest_ml_movers = movers_from(ordered.iter().copied());
        biggest_ml_movers.truncate(self.config.ml_movers_limit);

        let totals = total_movements(ordered.iter().copied());
        let totals_trend = TotalsTrend::from_movements(totals.iter().copied());
        let total_points_dropped = sum_movements(&totals);
        let totals_under_moves = totals.iter().filter(|m| **m < Decimal::ZERO).count();
        let totals_over_moves = totals.iter().filter(|m| **m > Decimal::ZERO).count();

        let props_with_movement = ordered.iter().filter(|m| is_moving_prop(m)).count();

        let mut prop_line_moves: Vec<PropLineMove> = ordered
            .iter()
            .filter(|m| m.kind() == MarketKind::Prop && m.signal.is_labelled())
            .filter_map(|m| {
                m.snapshot.movement.map(|movement| PropLineMove {
                    key: m.snapshot.key.clone(),
                    game_id: m.snapshot.game_id.clone(),
                    selection_name: m.snapshot.selection_name.clone(),
                    movement,
                    label: m.signal.label,
                })
            })
            .collect();
        prop_line_moves
            .sort_by(|a, b| by_magnitude(a.movement, b.movement).then_with(|| a.key.cmp(&b.key)));

        let juice_leans: Vec<LeanEntry> = ordered
            .iter()
            .filter_map(|m| match m.signal.juice_lean {
                Some(lean @ (JuiceLean::Over | JuiceLean::Under)) => Some(LeanEntry {
                    key: m.snapshot.key.clone(),
                    kind: m.kind(),
                    game_id: m.snapshot.game_id.clone(),
                    selection_name: m.snapshot.selection_name.clone(),
                    lean,
                }),
                _ => None,
            })
            .collect();

        let games = self.games(&ordered);

        let insights = SlateInsights {
            biggest_ml_movers,
            totals_trend,
            total_points_dropped,
            totals_under_moves,
            totals_over_moves,
            props_with_movement,
            prop_line_moves,
            juice_leans,
            games,
        };

        tracing::debug!(
            markets = markets.len(),
            movers = insights.biggest_ml_movers.len(),
            totals_trend = insights.totals_trend.as_str(),
            total_points_dropped = %insights.total_points_dropped,
            props_with_movement = insights.props_with_movement,
            "Slate aggregated"
        );

        insights
    }

    fn games(&self, ordered: &[&ClassifiedMarket]) -> Vec<GameInsight> {
        let mut by_game: BTreeMap<&str, Vec<&ClassifiedMarket>> = BTreeMap::new();
        for market in ordered.iter().copied() {
            by_game
                .entry(market.snapshot.game_id.as_str())
                .or_default()
                .push(market);
        }

        by_game
            .into_iter()
            .map(|(game_id, markets)| {
                let totals = total_movements(markets.iter().copied());
                let total_movement: Option<Decimal> = if totals.is_empty() {
                    None
                } else {
                    Some(sum_movements(&totals))
                };

                let count_direction = |direction: Direction| {
                    markets
                        .iter()
                        .filter(|m| m.kind() == MarketKind::Moneyline)
                        .filter(|m| m.signal.direction == direction)
                        .count()
                };

                GameInsight {
                    game_id: game_id.to_string(),
                    biggest_ml_mover: movers_from(markets.iter().copied()).into_iter().next(),
                    total_movement,
                    totals_trend: TotalsTrend::from_movements(totals),
                    steam_count: count_direction(Direction::Steam),
                    drift_count: count_direction(Direction::Drift),
                    props_with_movement: markets.iter().filter(|m| is_moving_prop(m)).count(),
                }
            })
            .collect()
    }
}
