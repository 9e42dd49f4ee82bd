//! Perf CLI - Command line interface for portfolio performance analytics.
//!
//! Every command prints an `ApiResponse` as JSON on stdout. Logs go to stderr.

use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};
use perf_core::{
    annualized_volatility, max_drawdown, period_returns, sharpe_ratio, AnalyticsConfig,
    ApiResponse, InMemorySource, PerformanceReportAssembler, PriceObservation, Result,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "perf")]
#[command(about = "Portfolio performance analytics - TWR, MWR, volatility, Sharpe, drawdown")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the performance report for a portfolio
    Report {
        /// JSON snapshot with accounts, transactions and prices
        #[arg(short, long)]
        data: PathBuf,
        /// Portfolio identifier
        #[arg(short, long)]
        portfolio: String,
        /// Config file (defaults to ~/.perf/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Max drawdown of a value series
    Drawdown {
        /// Values in chronological order (comma-separated)
        #[arg(short, long)]
        values: String,
    },
    /// Volatility and Sharpe ratio of a price series
    Risk {
        /// Close prices in chronological order (comma-separated)
        #[arg(short, long)]
        prices: String,
        /// Annual risk-free rate (0.02 = 2%)
        #[arg(long)]
        risk_free_rate: Option<f64>,
        /// Observation periods per year
        #[arg(long)]
        periods_per_year: Option<u32>,
    },
    /// Show the effective configuration
    Config {
        /// Config file (defaults to ~/.perf/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Report {
            data,
            portfolio,
            config,
        } => render(handle_report(&data, &portfolio, config.as_deref())),
        Commands::Drawdown { values } => render(handle_drawdown(&values)),
        Commands::Risk {
            prices,
            risk_free_rate,
            periods_per_year,
        } => render(handle_risk(&prices, risk_free_rate, periods_per_year)),
        Commands::Config { config } => render(load_config(config.as_deref())),
    };

    println!("{}", output);
}

fn render<T: Serialize>(result: Result<T>) -> String {
    let response = match result {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => {
            tracing::error!("{}", e);
            ApiResponse::err(e.to_string())
        }
    };

    serde_json::to_string_pretty(&response).unwrap_or_else(|e| {
        format!(r#"{{"ok": false, "error": "failed to encode response: {}"}}"#, e)
    })
}

fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => AnalyticsConfig::load_from_path(path),
        None => AnalyticsConfig::load(),
    }
}

fn handle_report(
    data: &Path,
    portfolio: &str,
    config: Option<&Path>,
) -> Result<perf_core::PerformanceReport> {
    let config = load_config(config)?;
    let source = InMemorySource::load(data)?;

    tracing::info!("Computing report for portfolio {}", portfolio);
    PerformanceReportAssembler::with_config(&source, config).assemble(portfolio)
}

fn handle_drawdown(values: &str) -> Result<serde_json::Value> {
    let values = parse_series(values)?;
    let drawdown = max_drawdown(&values)?;

    Ok(json!({
        "observations": values.len(),
        "max_drawdown": drawdown,
    }))
}

fn handle_risk(
    prices: &str,
    risk_free_rate: Option<f64>,
    periods_per_year: Option<u32>,
) -> Result<serde_json::Value> {
    let mut config = AnalyticsConfig::load()?;
    if let Some(rate) = risk_free_rate {
        config = config.with_risk_free_rate(rate);
    }
    if let Some(periods) = periods_per_year {
        config = config.with_periods_per_year(periods);
    }
    config.validate()?;

    // Synthetic consecutive dates; only the order matters for returns
    let start = NaiveDate::default();
    let observations: Vec<PriceObservation> = parse_series(prices)?
        .into_iter()
        .enumerate()
        .map(|(i, close)| PriceObservation::new(start + Duration::days(i as i64), close))
        .collect();

    let returns = period_returns(&observations)?;

    Ok(json!({
        "returns": returns.len(),
        "volatility": annualized_volatility(&returns, &config),
        "sharpe_ratio": sharpe_ratio(&returns, &config),
        "risk_free_rate": config.risk_free_rate,
        "periods_per_year": config.periods_per_year,
    }))
}

fn parse_series(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>().map_err(|_| {
                perf_core::Error::Validation(format!("not a number: {}", s))
            })
        })
        .collect()
}
