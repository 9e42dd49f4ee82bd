//! Perf Core - Portfolio performance analytics library.
//!
//! Computes a small set of standard performance and risk metrics from an
//! account's transactions and price history:
//!
//! - **Returns**: time-weighted return (TWR), approximate money-weighted return (MWR)
//! - **Risk metrics**: annualized volatility, Sharpe ratio, max drawdown
//! - **Reports**: one [`PerformanceReport`] per portfolio, assembled from a
//!   read-only [`PortfolioDataSource`]
//!
//! Every calculator is a pure function over in-memory data. Nothing is cached
//! or persisted.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use perf_core::portfolio::{assemble_cashflows, time_weighted_return};
//! use perf_core::{Transaction, TransactionType};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let transactions = vec![
//!     Transaction::new(TransactionType::Sell, 2000.0, day(30)),
//!     Transaction::new(TransactionType::Buy, 10000.0, day(1)),
//! ];
//!
//! let events = assemble_cashflows(&transactions).unwrap();
//! assert_eq!(events[0].resulting_value, 10000.0);
//! assert_eq!(events[1].resulting_value, 8000.0);
//!
//! let twr = time_weighted_return(&events).unwrap();
//! assert!(twr.is_finite());
//! ```

pub mod config;
pub mod portfolio;
pub mod types;

pub use config::AnalyticsConfig;

// Re-export commonly used types
pub use types::{
    Account, ApiResponse, CashflowEvent, Holding, PerformanceReport, PriceObservation,
    Transaction, TransactionType,
};

// Re-export main functionality
pub use portfolio::{
    annualized_volatility, assemble_cashflows, max_drawdown, money_weighted_return,
    period_returns, sharpe_ratio, time_weighted_return, InMemorySource, PerformanceReportAssembler,
    PortfolioDataSource,
};

/// Error types for perf-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Computation failed: {0}")]
    Computation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for perf-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinite inputs before they reach a calculator.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Computation(format!("{} is not a finite number: {}", what, value)))
    }
}
