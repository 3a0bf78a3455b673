//! Integration tests for reading sources

use crate::common::{fixture_path, moneyline, total};
use odds_movement::market::{MarketId, SlateReadings};
use odds_movement::signal::{Direction, JuiceLean};
use odds_movement::slate::{compute_slate_view, SlatePipeline, TotalsTrend};
use odds_movement::source::{JsonFileSource, MemorySource, ReadingSource, SourceError};
use rust_decimal_macros::dec;
use std::io::Write;

#[tokio::test]
async fn test_fixture_slate_view() {
    let source = JsonFileSource::new(fixture_path());
    let view = SlatePipeline::with_defaults()
        .refresh(&source)
        .await
        .unwrap();

    assert_eq!(view.snapshots.len(), 10);
    let insights = &view.insights;

    let movers: Vec<_> = insights
        .biggest_ml_movers
        .iter()
        .map(|m| (m.selection_name.as_str(), m.movement, m.direction))
        .collect();
    assert_eq!(
        movers,
        vec![
            ("Warriors", dec!(0.15), Direction::Drift),
            ("Lakers", dec!(-0.15), Direction::Steam),
            ("Celtics", dec!(0.15), Direction::Drift),
            ("Nuggets", dec!(-0.05), Direction::Steam),
        ]
    );

    assert_eq!(insights.totals_trend, TotalsTrend::Mixed);
    assert_eq!(insights.total_points_dropped, dec!(-1.5));
    assert_eq!(insights.totals_under_moves, 1);
    assert_eq!(insights.totals_over_moves, 1);
    assert_eq!(insights.props_with_movement, 2);
    assert_eq!(insights.prop_line_moves.len(), 1);

    let leans: Vec<_> = insights
        .juice_leans
        .iter()
        .map(|l| (l.key.market_id.as_str(), l.lean))
        .collect();
    assert_eq!(
        leans,
        vec![
            ("prop-lebron-pts", JuiceLean::Under),
            ("tot-lal-bos", JuiceLean::Over),
        ]
    );

    let games: Vec<_> = insights.games.iter().map(|g| g.game_id.as_str()).collect();
    assert_eq!(games, vec!["gsw-den", "lal-bos"]);
    let lal = &insights.games[1];
    assert_eq!(lal.total_movement, Some(dec!(-2.0)));
    assert_eq!(lal.steam_count, 1);
    assert_eq!(lal.drift_count, 1);
    assert_eq!(lal.props_with_movement, 1);

    let curry = view
        .snapshots
        .iter()
        .find(|s| s.market_id().as_str() == "prop-curry-3pm")
        .unwrap();
    assert!(curry.movement.is_none());
}

#[tokio::test]
async fn test_file_source_matches_compute() {
    let slate = SlateReadings::new(vec![
        moneyline("ml-a", "g1", dec!(2.00), dec!(1.80)),
        total("t-1", "g1", dec!(220.0), dec!(218.5)),
    ]);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&slate).unwrap().as_bytes())
        .unwrap();

    let source = JsonFileSource::new(file.path());
    let view = SlatePipeline::with_defaults()
        .refresh(&source)
        .await
        .unwrap();
    assert_eq!(view, compute_slate_view(&slate));

    let readings = source.fetch_readings(&MarketId::new("t-1")).await.unwrap();
    assert_eq!(readings.len(), 2);
}

#[tokio::test]
async fn test_failed_fetch_is_not_replaced() {
    let slate = SlateReadings::new(vec![moneyline("ml-a", "g1", dec!(2.00), dec!(1.80))]);
    let source = MemorySource::new(slate.clone());
    let pipeline = SlatePipeline::with_defaults();

    let first = pipeline.refresh(&source).await.unwrap();
    assert_eq!(first.insights.biggest_ml_movers.len(), 1);

    source.set_unavailable("odds store offline").await;
    let err = pipeline.refresh(&source).await.unwrap_err();
    assert!(matches!(err, SourceError::Unavailable(_)));

    source.set_slate(SlateReadings::default()).await;
    let recovered = pipeline.refresh(&source).await.unwrap();
    assert!(recovered.insights.biggest_ml_movers.is_empty());
}

#[tokio::test]
async fn test_missing_file_surfaces_io_error() {
    let source = JsonFileSource::new("/nonexistent/odds/slate.json");
    let err = SlatePipeline::with_defaults()
        .refresh(&source)
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }));
}
