//! Watch command implementation

use crate::config::Config;
use crate::slate::{SlatePipeline, SlateView};
use crate::source::{self, ReadingSource};
use clap::Args;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between refreshes; defaults to source.refresh_interval_secs
    #[arg(short, long)]
    pub interval_secs: Option<u64>,

    /// Stop after this many cycles
    #[arg(short = 'n', long)]
    pub cycles: Option<u64>,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let secs = self
            .interval_secs
            .unwrap_or(config.source.refresh_interval_secs);
        if secs == 0 {
            anyhow::bail!("--interval-secs must be at least 1");
        }
        let period = Duration::from_secs(secs);
        if self.cycles == Some(0) {
            return Ok(());
        }

        let source = source::from_config(&config.source)?;
        let pipeline = SlatePipeline::from_config(config);

        tracing::info!(
            source = source.name(),
            interval_secs = secs,
            cycles = ?self.cycles,
            "Watching slate"
        );

        let cycle = watch_until(
            &pipeline,
            source.as_ref(),
            period,
            self.cycles,
            interrupted(),
        )
        .await;

        tracing::info!(cycles = cycle, "Watch finished");
        Ok(())
    }
}

/// Resolves on ctrl-c; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

/// Refresh every `period` until `max_cycles` have run or `shutdown` resolves
///
/// `shutdown` is observed both while waiting for the next tick and while a
/// refresh is in flight. Returns the number of cycles started.
async fn watch_until(
    pipeline: &SlatePipeline,
    source: &dyn ReadingSource,
    period: Duration,
    max_cycles: Option<u64>,
    shutdown: impl Future<Output = ()>,
) -> u64 {
    tokio::pin!(shutdown);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut cycle: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }

        cycle += 1;

        // A refresh still running when the next cycle is due is dropped
        tokio::select! {
            result = timeout(period, pipeline.refresh(source)) => match result {
                Ok(Ok(view)) => report(cycle, &view),
                Ok(Err(e)) => {
                    tracing::warn!(cycle, error = %e, "Fetch failed, skipping cycle");
                }
                Err(_) => {
                    tracing::warn!(cycle, "Refresh overran the interval, discarding cycle");
                }
            },
            _ = &mut shutdown => {
                tracing::info!(cycle, "Interrupted during refresh, discarding cycle");
                break;
            }
        }

        if max_cycles.is_some_and(|max| cycle >= max) {
            break;
        }
    }

    cycle
}

fn report(cycle: u64, view: &SlateView) {
    let insights = &view.insights;
    let top = insights
        .biggest_ml_movers
        .first()
        .map(|m| format!("{} {}", m.selection_name, m.movement));

    tracing::info!(
        cycle,
        selections = view.snapshots.len(),
        top_ml_mover = top.as_deref().unwrap_or("-"),
        totals_trend = insights.totals_trend.as_str(),
        total_points = %insights.total_points_dropped,
        props_with_movement = insights.props_with_movement,
        prop_line_moves = insights.prop_line_moves.len(),
        juice_leans = insights.juice_leans.len(),
        "Cycle complete"
    );
}
