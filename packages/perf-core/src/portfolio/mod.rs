//! Portfolio analytics module.
//!
//! Provides cashflow assembly, return calculations, risk metrics and report assembly.

mod cashflow;
mod performance;
mod report;
mod risk;
mod source;

pub use cashflow::assemble_cashflows;
pub use performance::{money_weighted_return, time_weighted_return};
pub use report::{normalize_prices, PerformanceReportAssembler};
pub use risk::{annualized_volatility, max_drawdown, period_returns, sharpe_ratio};
pub use source::{InMemorySource, PortfolioDataSource, PortfolioRecord};
