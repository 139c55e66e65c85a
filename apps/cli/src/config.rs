//! Run configuration loaded from a TOML file with environment overrides.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use pricecross_core::constants::{DEFAULT_REPORTING_CURRENCY, DEFAULT_TOLERANCE_PERCENT};
use pricecross_core::pipeline::PipelineConfig;
use pricecross_core::recon::Tolerance;
use pricecross_market_data::FetchOptions;

/// Environment variable that overrides `providers.exchange_rate_api_key`.
pub const API_KEY_ENV: &str = "EXCHANGE_RATE_API_KEY";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_reporting_currency")]
    pub reporting_currency: String,

    #[serde(default)]
    pub tolerance: ToleranceConfig,

    pub inputs: InputsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToleranceConfig {
    /// "percent" or "absolute"
    #[serde(default = "default_tolerance_kind")]
    pub kind: String,

    /// Decimal as a string so the threshold stays exact (e.g., "0.5").
    #[serde(default = "default_tolerance_value")]
    pub value: String,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            kind: default_tolerance_kind(),
            value: default_tolerance_value(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputsConfig {
    /// Holdings registry CSV: ticker,quantity,exchange,currency
    pub holdings: PathBuf,

    /// Optional reference prices CSV: ticker,expected_price
    pub expected_prices: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_report_path")]
    pub report: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: default_report_path(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FetchConfig {
    pub concurrency: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchOptions::default();
        Self {
            concurrency: defaults.concurrency,
            max_retries: defaults.max_retries,
            timeout_secs: defaults.timeout.as_secs(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// ExchangeRate-API key; the environment variable takes precedence.
    pub exchange_rate_api_key: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the FX API key: environment first, then the config file.
    pub fn exchange_rate_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.providers.exchange_rate_api_key.clone())
    }

    pub fn tolerance(&self) -> Result<Tolerance> {
        let value = Decimal::from_str(&self.tolerance.value)
            .with_context(|| format!("invalid tolerance value '{}'", self.tolerance.value))?;
        match self.tolerance.kind.as_str() {
            "percent" => Ok(Tolerance::Percent(value)),
            "absolute" => Ok(Tolerance::Absolute(value)),
            other => bail!("unknown tolerance kind '{}'", other),
        }
    }

    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        Ok(PipelineConfig {
            reporting_currency: self.reporting_currency.clone(),
            tolerance: self.tolerance()?,
            fetch: FetchOptions {
                concurrency: self.fetch.concurrency,
                max_retries: self.fetch.max_retries,
                timeout: Duration::from_secs(self.fetch.timeout_secs),
                ..Default::default()
            },
        })
    }
}

fn default_reporting_currency() -> String {
    DEFAULT_REPORTING_CURRENCY.to_string()
}

fn default_tolerance_kind() -> String {
    "percent".to_string()
}

fn default_tolerance_value() -> String {
    DEFAULT_TOLERANCE_PERCENT.to_string()
}

fn default_report_path() -> PathBuf {
    PathBuf::from("reconciliation.csv")
}
