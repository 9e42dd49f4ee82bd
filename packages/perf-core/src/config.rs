//! Analytics configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Annualization periods for a daily series.
pub const DEFAULT_PERIODS_PER_YEAR: u32 = 252;

/// Default annual risk-free rate (2%).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Default cap on the price history fed to risk metrics.
pub const DEFAULT_MAX_PRICE_OBSERVATIONS: usize = 365;

/// Market conventions used by the risk calculators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Observation periods per year (252 for daily trading data)
    pub periods_per_year: u32,
    /// Annual risk-free rate as a decimal (0.02 = 2%)
    pub risk_free_rate: f64,
    /// Most recent price observations kept for volatility, Sharpe and drawdown
    pub max_price_observations: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            max_price_observations: DEFAULT_MAX_PRICE_OBSERVATIONS,
        }
    }
}

impl AnalyticsConfig {
    /// Load the config from the default path.
    ///
    /// Default path: `~/.perf/config.toml`
    /// Can be overridden with `PERF_CONFIG_FILE` environment variable.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("PERF_CONFIG_FILE") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".perf/config.toml"))
            .unwrap_or_else(|| PathBuf::from("perf.toml"))
    }

    /// Load and validate a config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every option is usable by the calculators.
    pub fn validate(&self) -> Result<()> {
        if self.periods_per_year == 0 {
            return Err(Error::Validation(
                "periods_per_year must be greater than zero".to_string(),
            ));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(Error::Validation(
                "risk_free_rate must be a finite number".to_string(),
            ));
        }
        if self.max_price_observations < 2 {
            return Err(Error::Validation(
                "max_price_observations must be at least 2".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    pub fn with_periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    pub(crate) fn periods(&self) -> f64 {
        self.periods_per_year as f64
    }
}
