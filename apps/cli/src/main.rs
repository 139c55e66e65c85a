mod config;

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use config::{Config, API_KEY_ENV};
use pricecross_core::holdings::{load_expected_prices, HoldingsRegistry};
use pricecross_core::pipeline::ReconciliationPipeline;
use pricecross_core::recon::ReconStatus;
use pricecross_core::report::{CsvReportSink, LogReportSink, ReportSink};
use pricecross_market_data::{ExchangeRateApiProvider, YahooChartProvider};

/// Daily close-price reconciliation against a holdings registry.
#[derive(Parser, Debug)]
#[command(name = "pricecross", version, about)]
struct Cli {
    /// Path to the run configuration file
    #[arg(short, long, default_value = "pricecross.toml")]
    config: PathBuf,

    /// Log the report instead of writing the CSV artifact
    #[arg(long)]
    dry_run: bool,

    /// Exit nonzero when any holding is out of tolerance or missing data
    #[arg(long)]
    strict: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::load(&cli.config)?;

    // Registry problems are fatal before any vendor is contacted.
    let registry = HoldingsRegistry::from_csv_path(&config.inputs.holdings)
        .context("loading holdings registry")?;
    let expected = match &config.inputs.expected_prices {
        Some(path) => load_expected_prices(path).context("loading reference prices")?,
        None => HashMap::new(),
    };

    let api_key = match config.exchange_rate_api_key() {
        Some(key) => key,
        None => {
            tracing::warn!(
                "No FX API key configured ({} or providers.exchange_rate_api_key); \
                 cross-currency holdings will fail normalization",
                API_KEY_ENV
            );
            String::new()
        }
    };

    let pipeline = ReconciliationPipeline::new(
        Arc::new(YahooChartProvider::new()),
        Arc::new(ExchangeRateApiProvider::new(api_key)),
        config.pipeline_config()?,
    );

    let records = pipeline.run(&registry, &expected).await?;

    let sink: Box<dyn ReportSink> = if cli.dry_run {
        Box::new(LogReportSink)
    } else {
        Box::new(CsvReportSink::new(&config.output.report))
    };
    sink.write(&records)?;

    let breaches = records
        .iter()
        .filter(|r| {
            matches!(
                r.status,
                ReconStatus::OutOfTolerance
                    | ReconStatus::NoQuoteAvailable
                    | ReconStatus::NormalizationFailed
            )
        })
        .count();
    if breaches > 0 {
        tracing::warn!("{} of {} holdings need attention", breaches, records.len());
    }

    if cli.strict && breaches > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
