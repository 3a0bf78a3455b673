//! Configuration types for odds-movement

use crate::market::MarketKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Rounding units applied to movement when a snapshot is built
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizerConfig {
    /// Decimal-odds tick for moneylines
    #[serde(default = "default_moneyline_tick")]
    pub moneyline_tick: Decimal,

    /// Points tick for game totals
    #[serde(default = "default_line_tick")]
    pub total_tick: Decimal,

    /// Points tick for player props
    #[serde(default = "default_line_tick")]
    pub prop_tick: Decimal,
}

fn default_moneyline_tick() -> Decimal {
    Decimal::new(1, 2) // 0.01
}
fn default_line_tick() -> Decimal {
    Decimal::new(1, 1) // 0.1
}

impl NormalizerConfig {
    pub fn tick_for(&self, kind: MarketKind) -> Decimal {
        match kind {
            MarketKind::Moneyline => self.moneyline_tick,
            MarketKind::Total => self.total_tick,
            MarketKind::Prop => self.prop_tick,
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            moneyline_tick: Decimal::new(1, 2),
            total_tick: Decimal::new(1, 1),
            prop_tick: Decimal::new(1, 1),
        }
    }
}

/// How the sign of a movement maps to a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Decimal price: shortening is steam, lengthening is drift
    Price,
    /// Points line: dropping is under pressure, rising is over pressure
    Line,
}

/// Polarity per market kind
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolarityConfig {
    #[serde(default = "default_price_polarity")]
    pub moneyline: Polarity,
    #[serde(default = "default_line_polarity")]
    pub total: Polarity,
    #[serde(default = "default_line_polarity")]
    pub prop: Polarity,
}

fn default_price_polarity() -> Polarity {
    Polarity::Price
}
fn default_line_polarity() -> Polarity {
    Polarity::Line
}

impl PolarityConfig {
    pub fn for_kind(&self, kind: MarketKind) -> Polarity {
        match kind {
            MarketKind::Moneyline => self.moneyline,
            MarketKind::Total => self.total,
            MarketKind::Prop => self.prop,
        }
    }
}

impl Default for PolarityConfig {
    fn default() -> Self {
        Self {
            moneyline: Polarity::Price,
            total: Polarity::Line,
            prop: Polarity::Line,
        }
    }
}

/// Movement classification thresholds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Prop movement must exceed this (strictly) to earn a line label
    #[serde(default = "default_prop_label_threshold")]
    pub prop_label_threshold: Decimal,

    /// Same overlay for totals; unset leaves totals unlabelled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_label_threshold: Option<Decimal>,

    /// Over/under odds gap that signals a juice lean on totals
    #[serde(default = "default_total_juice_threshold")]
    pub total_juice_threshold: Decimal,

    /// Over/under odds gap that signals a juice lean on props
    #[serde(default = "default_prop_juice_threshold")]
    pub prop_juice_threshold: Decimal,

    #[serde(default)]
    pub polarity: PolarityConfig,
}

fn default_prop_label_threshold() -> Decimal {
    Decimal::ONE
}
fn default_total_juice_threshold() -> Decimal {
    Decimal::new(5, 2) // 0.05
}
fn default_prop_juice_threshold() -> Decimal {
    Decimal::new(3, 2) // 0.03
}

impl ClassifierConfig {
    /// Label threshold for a kind, if that kind is labelled at all
    pub fn label_threshold(&self, kind: MarketKind) -> Option<Decimal> {
        match kind {
            MarketKind::Moneyline => None,
            MarketKind::Total => self.total_label_threshold,
            MarketKind::Prop => Some(self.prop_label_threshold),
        }
    }

    /// Juice-lean threshold for a kind, if that kind leans at all
    pub fn juice_threshold(&self, kind: MarketKind) -> Option<Decimal> {
        match kind {
            MarketKind::Moneyline => None,
            MarketKind::Total => Some(self.total_juice_threshold),
            MarketKind::Prop => Some(self.prop_juice_threshold),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            prop_label_threshold: Decimal::ONE,
            total_label_threshold: None,
            total_juice_threshold: Decimal::new(5, 2),
            prop_juice_threshold: Decimal::new(3, 2),
            polarity: PolarityConfig::default(),
        }
    }
}

/// Slate aggregation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregatorConfig {
    /// Display bound on the biggest moneyline movers list
    #[serde(default = "default_ml_movers_limit")]
    pub ml_movers_limit: usize,
}

fn default_ml_movers_limit() -> usize {
    5
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self { ml_movers_limit: 5 }
    }
}

/// Where raw readings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    File,
    Http,
}

/// Reading source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Slate JSON document for the file source
    #[serde(default = "default_source_path")]
    pub path: PathBuf,

    /// Slate JSON endpoint for the http source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Upstream request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Refresh cadence for `watch`
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("./fixtures/sample_slate.json")
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_refresh_interval_secs() -> u64 {
    60
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::File,
            path: default_source_path(),
            url: None,
            timeout_secs: 10,
            refresh_interval_secs: 60,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        for kind in [MarketKind::Moneyline, MarketKind::Total, MarketKind::Prop] {
            let tick = self.normalizer.tick_for(kind);
            if tick <= Decimal::ZERO {
                anyhow::bail!("normalizer tick for {kind} must be positive, got {tick}");
            }
        }

        let thresholds = [
            ("prop_label_threshold", Some(self.classifier.prop_label_threshold)),
            ("total_label_threshold", self.classifier.total_label_threshold),
            ("total_juice_threshold", Some(self.classifier.total_juice_threshold)),
            ("prop_juice_threshold", Some(self.classifier.prop_juice_threshold)),
        ];
        for (name, value) in thresholds {
            if let Some(value) = value {
                if value.is_sign_negative() && !value.is_zero() {
                    anyhow::bail!("classifier.{name} must not be negative, got {value}");
                }
            }
        }

        if self.source.refresh_interval_secs == 0 {
            anyhow::bail!("source.refresh_interval_secs must be at least 1");
        }
        if self.source.kind == SourceKind::Http && self.source.url.is_none() {
            anyhow::bail!("source.url is required when source.kind = \"http\"");
        }

        Ok(())
    }
}
