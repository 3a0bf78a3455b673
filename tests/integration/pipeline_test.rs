//! Integration tests for the slate pipeline

use crate::common::{moneyline, prop, total};
use odds_movement::config::Config;
use odds_movement::market::{MarketId, SlateReadings};
use odds_movement::signal::{Direction, LineLabel, Signal};
use odds_movement::slate::{compute_slate_view, SlatePipeline, SlateView, TotalsTrend};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn signal_for<'a>(view: &'a SlateView, id: &str) -> &'a Signal {
    view.signals
        .iter()
        .find(|s| s.key.market_id == MarketId::new(id))
        .unwrap()
}

#[test]
fn test_moneyline_movers_scenario() {
    let slate = SlateReadings::new(vec![
        moneyline("ml-c", "g3", dec!(2.00), dec!(1.98)),
        moneyline("ml-a", "g1", dec!(2.00), dec!(1.80)),
        moneyline("ml-b", "g2", dec!(2.00), dec!(2.05)),
    ]);

    let view = compute_slate_view(&slate);
    let movers = &view.insights.biggest_ml_movers;

    let movements: Vec<_> = movers.iter().map(|m| m.movement).collect();
    assert_eq!(movements, vec![dec!(-0.20), dec!(0.05), dec!(-0.02)]);

    let directions: Vec<_> = movers.iter().map(|m| m.direction).collect();
    assert_eq!(
        directions,
        vec![Direction::Steam, Direction::Drift, Direction::Steam]
    );
}

#[test]
fn test_totals_scenario() {
    let slate = SlateReadings::new(vec![
        total("t-1", "g1", dec!(220.0), dec!(218.5)),
        total("t-2", "g2", dec!(231.0), dec!(229.0)),
        total("t-3", "g3", dec!(214.5), dec!(214.0)),
    ]);

    let view = compute_slate_view(&slate);
    assert_eq!(view.insights.totals_trend, TotalsTrend::AllUnder);
    assert_eq!(view.insights.total_points_dropped, dec!(-4.0));
    assert_eq!(view.insights.totals_under_moves, 3);
    assert_eq!(view.insights.totals_over_moves, 0);

    for id in ["t-1", "t-2", "t-3"] {
        assert_eq!(signal_for(&view, id).direction, Direction::UnderPressure);
    }
}

#[test]
fn test_flat_and_mixed_totals() {
    let flat = SlateReadings::new(vec![
        total("t-1", "g1", dec!(220.0), dec!(220.0)),
        total("t-2", "g2", dec!(231.0), dec!(231.0)),
    ]);
    assert_eq!(
        compute_slate_view(&flat).insights.totals_trend,
        TotalsTrend::Mixed
    );

    let mixed = SlateReadings::new(vec![
        total("t-1", "g1", dec!(220.0), dec!(221.5)),
        total("t-2", "g2", dec!(231.0), dec!(229.0)),
    ]);
    let view = compute_slate_view(&mixed);
    assert_eq!(view.insights.totals_trend, TotalsTrend::Mixed);
    assert_eq!(view.insights.total_points_dropped, dec!(-0.5));
}

#[test]
fn test_props_scenario() {
    let slate = SlateReadings::new(vec![
        prop("p-1", "g1", dec!(20.0), dec!(20.0)),
        prop("p-2", "g1", dec!(20.0), dec!(18.5)),
        prop("p-3", "g1", dec!(20.0), dec!(20.3)),
        prop("p-4", "g1", dec!(20.0), dec!(22.0)),
        prop("p-5", "g1", dec!(20.0), dec!(19.1)),
    ]);

    let view = compute_slate_view(&slate);
    assert_eq!(view.insights.props_with_movement, 4);

    let labels: Vec<_> = ["p-1", "p-2", "p-3", "p-4", "p-5"]
        .iter()
        .map(|id| signal_for(&view, id).label)
        .collect();
    assert_eq!(
        labels,
        vec![
            LineLabel::None,
            LineLabel::LineDrop,
            LineLabel::None,
            LineLabel::LineRise,
            LineLabel::None
        ]
    );

    let ranked: Vec<_> = view
        .insights
        .prop_line_moves
        .iter()
        .map(|m| m.key.market_id.as_str().to_string())
        .collect();
    assert_eq!(ranked, vec!["p-4", "p-2"]);
}

#[test]
fn test_prop_threshold_boundary() {
    let at_threshold = SlateReadings::new(vec![prop("p-1", "g1", dec!(20.0), dec!(19.0))]);
    let view = compute_slate_view(&at_threshold);
    assert_eq!(signal_for(&view, "p-1").label, LineLabel::None);

    // A finer tick keeps the extra hundredth
    let mut config = Config::default();
    config.normalizer.prop_tick = dec!(0.01);
    let pipeline = SlatePipeline::from_config(&config);

    let over_threshold = SlateReadings::new(vec![prop("p-1", "g1", dec!(20.00), dec!(18.99))]);
    let view = pipeline.compute_slate_view(&over_threshold);
    assert_eq!(view.snapshots[0].movement, Some(dec!(-1.01)));
    assert_eq!(signal_for(&view, "p-1").label, LineLabel::LineDrop);
}

#[test]
fn test_polarity_inverts_between_kinds() {
    let slate = SlateReadings::new(vec![
        moneyline("ml-down", "g1", dec!(2.00), dec!(1.85)),
        moneyline("ml-up", "g1", dec!(2.00), dec!(2.15)),
        total("t-down", "g1", dec!(220.0), dec!(219.85)),
        total("t-up", "g2", dec!(220.0), dec!(220.15)),
    ]);

    let view = compute_slate_view(&slate);
    assert_eq!(signal_for(&view, "ml-down").direction, Direction::Steam);
    assert_eq!(signal_for(&view, "ml-up").direction, Direction::Drift);
    assert_eq!(
        signal_for(&view, "t-down").direction,
        Direction::UnderPressure
    );
    assert_eq!(signal_for(&view, "t-up").direction, Direction::OverPressure);
}

#[test]
fn test_view_is_order_independent() {
    let markets = vec![
        moneyline("ml-a", "g1", dec!(2.00), dec!(1.80)),
        moneyline("ml-b", "g2", dec!(1.50), dec!(1.70)),
        moneyline("ml-c", "g3", dec!(3.00), dec!(2.80)),
        total("t-1", "g1", dec!(220.0), dec!(218.5)),
        prop("p-1", "g2", dec!(20.0), dec!(22.0)),
    ];
    let forward = SlateReadings::new(markets.clone());

    let mut shuffled = markets;
    shuffled.swap(0, 4);
    shuffled.swap(1, 3);
    for entry in &mut shuffled {
        entry.readings.reverse();
    }
    let shuffled = SlateReadings::new(shuffled);

    let a = compute_slate_view(&forward);
    let b = compute_slate_view(&shuffled);
    assert_eq!(a, b);

    // Equal magnitudes tie-break on key
    let ids: Vec<_> = a
        .insights
        .biggest_ml_movers
        .iter()
        .map(|m| m.key.market_id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["ml-a", "ml-b", "ml-c"]);
}

#[test]
fn test_movers_capped_by_config() {
    let slate = SlateReadings::new(
        (0..8i64)
            .map(|i| {
                let id = format!("ml-{i}");
                let current = dec!(2.00) + dec!(0.01) * Decimal::from(i + 1);
                moneyline(&id, &format!("g{i}"), dec!(2.00), current)
            })
            .collect(),
    );

    assert_eq!(compute_slate_view(&slate).insights.biggest_ml_movers.len(), 5);

    let mut config = Config::default();
    config.aggregator.ml_movers_limit = 3;
    let view = SlatePipeline::from_config(&config).compute_slate_view(&slate);
    let movements: Vec<_> = view
        .insights
        .biggest_ml_movers
        .iter()
        .map(|m| m.movement)
        .collect();
    assert_eq!(movements, vec![dec!(0.08), dec!(0.07), dec!(0.06)]);
}

#[tokio::test]
async fn test_concurrent_views_do_not_interfere() {
    let pipeline = Arc::new(SlatePipeline::with_defaults());
    let slate = Arc::new(SlateReadings::new(vec![
        moneyline("ml-a", "g1", dec!(2.00), dec!(1.80)),
        total("t-1", "g1", dec!(220.0), dec!(218.5)),
        prop("p-1", "g1", dec!(20.0), dec!(22.0)),
    ]));
    let expected = pipeline.compute_slate_view(&slate);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            let slate = Arc::clone(&slate);
            tokio::spawn(async move { pipeline.compute_slate_view(&slate) })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}

#[test]
fn test_extreme_readings_do_not_abort_the_view() {
    let slate = SlateReadings::new(vec![
        total("t-wild", "g1", Decimal::MIN, Decimal::MAX),
        moneyline("ml-big", "g1", Decimal::MAX, Decimal::MAX),
        total("t-1", "g2", dec!(220.0), dec!(218.5)),
    ]);

    let view = compute_slate_view(&slate);

    let wild = view
        .snapshots
        .iter()
        .find(|s| s.market_id().as_str() == "t-wild")
        .unwrap();
    assert!(wild.movement.is_none());
    assert_eq!(signal_for(&view, "t-wild").direction, Direction::None);

    assert_eq!(view.insights.totals_trend, TotalsTrend::AllUnder);
    assert_eq!(view.insights.total_points_dropped, dec!(-1.5));
}
