//! Portfolio risk metrics calculation.
//!
//! Provides period returns, annualized volatility, Sharpe ratio and max drawdown.

use crate::config::AnalyticsConfig;
use crate::types::PriceObservation;
use crate::{ensure_finite, Error, Result};

/// Annualized volatility at or below this is rounding noise from identical returns.
const VOLATILITY_NOISE: f64 = 1e-12;

/// Simple period-over-period returns of a chronological price series.
///
/// `returns[i - 1] = (price[i] - price[i - 1]) / price[i - 1]`. A zero
/// previous price yields a 0 return for that period. Fewer than two
/// observations yield an empty series.
///
/// # Errors
///
/// Returns `Error::Computation` if any close price is not finite.
pub fn period_returns(prices: &[PriceObservation]) -> Result<Vec<f64>> {
    for price in prices {
        ensure_finite(price.close_price, "close price")?;
    }

    let returns = prices
        .windows(2)
        .map(|pair| {
            let previous = pair[0].close_price;
            if previous != 0.0 {
                (pair[1].close_price - previous) / previous
            } else {
                0.0
            }
        })
        .collect();

    Ok(returns)
}

/// Annualized volatility of a return series.
///
/// Population standard deviation scaled by `sqrt(periods_per_year)`, on the
/// same scale as the input returns (0.2 = 20%). Fewer than two returns yield 0,
/// as does a series of equal returns whose spread is only floating-point noise.
pub fn annualized_volatility(returns: &[f64], config: &AnalyticsConfig) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

    let volatility = variance.sqrt() * config.periods().sqrt();
    if volatility <= VOLATILITY_NOISE {
        0.0
    } else {
        volatility
    }
}

/// Calculate Sharpe ratio from returns.
///
/// # Arguments
///
/// * `returns` - Period returns
/// * `config` - Annualization periods and annual risk-free rate
///
/// # Returns
///
/// `(mean * periods_per_year - risk_free_rate) / annualized_volatility`, or 0
/// with fewer than two returns or zero volatility.
pub fn sharpe_ratio(returns: &[f64], config: &AnalyticsConfig) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let volatility = annualized_volatility(returns, config);
    if volatility <= 0.0 {
        return 0.0;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let annualized_return = mean * config.periods();

    (annualized_return - config.risk_free_rate) / volatility
}

/// Calculate maximum drawdown from a series of values, in percent.
///
/// Tracks the running peak and returns the largest `(peak - value) / peak`
/// seen. A zero peak is skipped. Fewer than two values yield 0.
///
/// # Errors
///
/// Returns `Error::Computation` if a value is negative or not finite.
pub fn max_drawdown(values: &[f64]) -> Result<f64> {
    for &value in values {
        ensure_finite(value, "series value")?;
        if value < 0.0 {
            return Err(Error::Computation(format!(
                "series value cannot be negative: {}",
                value
            )));
        }
    }

    if values.len() < 2 {
        return Ok(0.0);
    }

    let mut peak = values[0];
    let mut max_drawdown = 0.0;

    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let drawdown = (peak - value) / peak;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    Ok(max_drawdown * 100.0)
}
