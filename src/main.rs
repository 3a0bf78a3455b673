use anyhow::Context;
use clap::Parser;
use odds_movement::cli::{Cli, Commands};
use odds_movement::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))
                .context("Bundled default config is invalid")?
        }
    };

    // Initialize telemetry
    let _telemetry = odds_movement::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::View(args) => {
            args.execute(&config).await?;
        }
        Commands::Watch(args) => {
            tracing::info!("Starting watch mode");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("# Effective configuration (from {})", cli.config);
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
