//! Performance report assembly.

use super::cashflow::assemble_cashflows;
use super::performance::{money_weighted_return, time_weighted_return};
use super::risk::{annualized_volatility, max_drawdown, period_returns, sharpe_ratio};
use super::source::PortfolioDataSource;
use crate::config::AnalyticsConfig;
use crate::types::{PerformanceReport, PriceObservation};
use crate::{ensure_finite, Error, Result};
use rayon::prelude::*;

/// Composes cashflows, returns and risk metrics into a [`PerformanceReport`].
#[derive(Debug)]
pub struct PerformanceReportAssembler<'a, S: ?Sized> {
    source: &'a S,
    config: AnalyticsConfig,
}

impl<'a, S> PerformanceReportAssembler<'a, S>
where
    S: PortfolioDataSource + ?Sized,
{
    /// Create an assembler with the default config.
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, AnalyticsConfig::default())
    }

    pub fn with_config(source: &'a S, config: AnalyticsConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Build the report for one portfolio.
    ///
    /// # Errors
    ///
    /// - `Error::Validation` if the id is blank or the config is invalid
    /// - `Error::NotFound` if the portfolio has no accounts
    /// - `Error::Computation` if any record holds a non-finite number
    /// - whatever the data source returns
    pub fn assemble(&self, portfolio_id: &str) -> Result<PerformanceReport> {
        let portfolio_id = portfolio_id.trim();
        if portfolio_id.is_empty() {
            return Err(Error::Validation("portfolio id is required".to_string()));
        }
        self.config.validate()?;

        let accounts = self.source.list_accounts(portfolio_id)?;
        if accounts.is_empty() {
            return Err(Error::NotFound(format!(
                "no accounts for portfolio {}",
                portfolio_id
            )));
        }

        let mut current_value = 0.0;
        let mut total_cost = 0.0;
        let mut transactions = Vec::new();

        for account in &accounts {
            current_value += ensure_finite(account.current_value(), "holding value")?;
            total_cost += ensure_finite(account.total_cost(), "holding cost basis")?;
            transactions.extend(self.source.list_transactions(portfolio_id, &account.id)?);
        }

        let events = assemble_cashflows(&transactions)?;
        let twr_pct = time_weighted_return(&events)?;
        let mwr_pct = money_weighted_return(&events, current_value)?;

        let prices = normalize_prices(
            self.source.list_prices(portfolio_id)?,
            self.config.max_price_observations,
        );
        let returns = period_returns(&prices)?;
        let volatility_pct = annualized_volatility(&returns, &self.config);
        let sharpe_ratio = sharpe_ratio(&returns, &self.config);

        let values: Vec<f64> = prices.iter().map(|p| p.close_price).collect();
        let max_drawdown_pct = max_drawdown(&values)?;

        let total_return_pct = if total_cost > 0.0 {
            (current_value - total_cost) / total_cost * 100.0
        } else {
            tracing::warn!(portfolio_id, "Total cost is zero, total return set to 0");
            0.0
        };

        tracing::debug!(
            portfolio_id,
            accounts = accounts.len(),
            transactions = transactions.len(),
            prices = prices.len(),
            "Assembled performance report"
        );

        Ok(PerformanceReport {
            current_value,
            total_cost,
            total_return_pct,
            twr_pct,
            mwr_pct,
            volatility_pct,
            sharpe_ratio,
            max_drawdown_pct,
        })
    }
}

impl<'a, S> PerformanceReportAssembler<'a, S>
where
    S: PortfolioDataSource + Sync + ?Sized,
{
    /// Build reports for many portfolios in parallel.
    ///
    /// Results come back in input order; one portfolio failing does not
    /// affect the others.
    pub fn assemble_many<I>(&self, portfolio_ids: &[I]) -> Vec<(String, Result<PerformanceReport>)>
    where
        I: AsRef<str> + Sync,
    {
        portfolio_ids
            .par_iter()
            .map(|id| {
                let id = id.as_ref();
                (id.to_string(), self.assemble(id))
            })
            .collect()
    }
}

/// Sort prices chronologically and keep the most recent `limit` observations.
pub fn normalize_prices(mut prices: Vec<PriceObservation>, limit: usize) -> Vec<PriceObservation> {
    prices.sort_by_key(|p| p.date);
    if prices.len() > limit {
        let dropped = prices.len() - limit;
        tracing::debug!(dropped, "Truncated price history");
        prices.drain(..dropped);
    }
    prices
}
