//! View command implementation

use crate::config::Config;
use crate::slate::{SlatePipeline, SlateView};
use crate::source::{self, JsonFileSource, ReadingSource};
use anyhow::Context;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Slate JSON file; overrides the configured source
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ViewArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let source: Box<dyn ReadingSource> = match &self.input {
            Some(path) => Box::new(JsonFileSource::new(path.clone())),
            None => source::from_config(&config.source)?,
        };

        let pipeline = SlatePipeline::from_config(config);
        let view = pipeline
            .refresh(source.as_ref())
            .await
            .with_context(|| format!("Failed to fetch slate from {} source", source.name()))?;

        tracing::info!(
            selections = view.snapshots.len(),
            props_with_movement = view.insights.props_with_movement,
            totals_trend = view.insights.totals_trend.as_str(),
            "Slate view ready"
        );

        match self.format {
            OutputFormat::Table => print!("{}", render_table(&view)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        }

        Ok(())
    }
}

fn cell(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Render a slate view as a plain-text table followed by a summary
pub fn render_table(view: &SlateView) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<24} {:<10} {:<28} {:>8} {:>8} {:>8} {:<15} {:<10} {:<8}",
        "KEY", "KIND", "SELECTION", "OPEN", "CURRENT", "MOVE", "DIRECTION", "LABEL", "LEAN"
    );
    for (snapshot, signal) in view.markets() {
        let _ = writeln!(
            out,
            "{:<24} {:<10} {:<28} {:>8} {:>8} {:>8} {:<15} {:<10} {:<8}",
            snapshot.key.to_string(),
            snapshot.kind.as_str(),
            snapshot.selection_name,
            cell(snapshot.open),
            cell(snapshot.current),
            cell(snapshot.movement),
            signal.direction.as_str(),
            signal.label.as_str(),
            signal.juice_lean.map_or("-", |l| l.as_str()),
        );
    }

    let insights = &view.insights;
    let _ = writeln!(out);
    let _ = writeln!(out, "Biggest moneyline movers:");
    if insights.biggest_ml_movers.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for mover in &insights.biggest_ml_movers {
        let _ = writeln!(
            out,
            "  {:<28} {:>8} {}",
            mover.selection_name,
            mover.movement,
            mover.direction.as_str()
        );
    }
    let _ = writeln!(
        out,
        "Totals: {} ({} points, {} under / {} over)",
        insights.totals_trend.as_str(),
        insights.total_points_dropped,
        insights.totals_under_moves,
        insights.totals_over_moves
    );
    let _ = writeln!(out, "Props with movement: {}", insights.props_with_movement);
    for game in &insights.games {
        let _ = writeln!(
            out,
            "  {:<16} total {:>6} {:<10} steam {} drift {} props {}",
            game.game_id,
            cell(game.total_movement),
            game.totals_trend.as_str(),
            game.steam_count,
            game.drift_count,
            game.props_with_movement
        );
    }

    out
}
