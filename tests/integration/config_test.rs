//! Integration tests for configuration loading

use odds_movement::config::{Config, LogFormat, Polarity, SourceKind};
use odds_movement::market::MarketKind;
use rust_decimal_macros::dec;
use std::io::Write;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_example_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.normalizer.tick_for(MarketKind::Moneyline), dec!(0.01));
    assert_eq!(config.normalizer.tick_for(MarketKind::Prop), dec!(0.1));
    assert_eq!(config.classifier.prop_label_threshold, dec!(1.0));
    assert_eq!(config.classifier.total_juice_threshold, dec!(0.05));
    assert_eq!(config.classifier.prop_juice_threshold, dec!(0.03));
    assert_eq!(
        config.classifier.polarity.for_kind(MarketKind::Total),
        Polarity::Line
    );
    assert_eq!(config.aggregator.ml_movers_limit, 5);
    assert_eq!(config.source.kind, SourceKind::File);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert!(config.telemetry.metrics_port.is_none());
}

#[test]
fn test_empty_config_uses_defaults() {
    let file = write_config("");
    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.normalizer.total_tick, dec!(0.1));
    assert_eq!(config.classifier.label_threshold(MarketKind::Total), None);
    assert_eq!(config.source.refresh_interval_secs, 60);
    assert_eq!(config.telemetry.log_level, "info");
}

#[test]
fn test_partial_override() {
    let file = write_config(
        r#"
[classifier]
total_label_threshold = "1.5"

[source]
kind = "http"
url = "http://localhost:8080/slate"

[telemetry]
log_format = "json"
metrics_port = 9000
"#,
    );
    let config = Config::load(file.path()).unwrap();

    assert_eq!(
        config.classifier.label_threshold(MarketKind::Total),
        Some(dec!(1.5))
    );
    assert_eq!(config.classifier.prop_label_threshold, dec!(1));
    assert_eq!(config.source.kind, SourceKind::Http);
    assert_eq!(config.telemetry.log_format, LogFormat::Json);
    assert_eq!(config.telemetry.metrics_port, Some(9000));
}

#[test]
fn test_invalid_configs_rejected() {
    let zero_tick = write_config("[normalizer]\nprop_tick = \"0\"\n");
    assert!(Config::load(zero_tick.path()).is_err());

    let negative = write_config("[classifier]\nprop_juice_threshold = \"-0.03\"\n");
    assert!(Config::load(negative.path()).is_err());

    let zero_interval = write_config("[source]\nrefresh_interval_secs = 0\n");
    assert!(Config::load(zero_interval.path()).is_err());

    let http_without_url = write_config("[source]\nkind = \"http\"\n");
    assert!(Config::load(http_without_url.path()).is_err());
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = Config::default();
    let rendered = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&rendered).unwrap();
    parsed.validate().unwrap();
    assert_eq!(parsed.normalizer.moneyline_tick, dec!(0.01));
}
