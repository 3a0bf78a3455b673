//! CLI interface for odds-movement
//!
//! Provides subcommands for:
//! - `view`: One fetch, printed as a table or JSON
//! - `watch`: Refresh loop on the configured interval
//! - `config`: Show the effective configuration

mod view;
mod watch;

pub use view::{render_table, OutputFormat, ViewArgs};
pub use watch::WatchArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "odds-movement")]
#[command(about = "Odds-movement signals for basketball moneyline, total and prop markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the slate once and print its view
    View(ViewArgs),
    /// Refresh the slate view on an interval
    Watch(WatchArgs),
    /// Show the effective configuration
    Config,
}
