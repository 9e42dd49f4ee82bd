//! Core data types for portfolio performance analytics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of account transaction that moves money in or out of an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Buy,
    Sell,
    TransferIn,
    TransferOut,
}

impl TransactionType {
    /// Whether this transaction adds money to the account.
    pub fn is_inflow(&self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::TransferIn)
    }
}

/// A raw account transaction as supplied by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Buy, sell, or transfer direction
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Net amount of the transaction (sign is ignored for outflows)
    pub net_amount: f64,
    /// Trade or settlement date
    pub date: NaiveDate,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(kind: TransactionType, net_amount: f64, date: NaiveDate) -> Self {
        Self {
            kind,
            net_amount,
            date,
        }
    }

    /// Signed cashflow: positive for buys and transfers in, negative otherwise.
    pub fn signed_amount(&self) -> f64 {
        if self.kind.is_inflow() {
            self.net_amount
        } else {
            -self.net_amount.abs()
        }
    }
}

/// One transaction's effect on account value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CashflowEvent {
    pub date: NaiveDate,
    /// Signed cashflow (positive for deposits/buys, negative for withdrawals/sells)
    pub cashflow: f64,
    /// Account value after applying this cashflow
    pub resulting_value: f64,
}

impl CashflowEvent {
    pub fn new(date: NaiveDate, cashflow: f64, resulting_value: f64) -> Self {
        Self {
            date,
            cashflow,
            resulting_value,
        }
    }
}

/// A single close price in a price history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub close_price: f64,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, close_price: f64) -> Self {
        Self { date, close_price }
    }
}

/// A holding within an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    /// Ticker symbol (uppercase)
    pub symbol: String,
    /// Current market value of the holding
    pub current_value: f64,
    /// Total cost basis of the holding
    pub cost_basis: f64,
}

impl Holding {
    /// Create a new holding, normalizing the symbol to uppercase.
    pub fn new(symbol: &str, current_value: f64, cost_basis: f64) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            current_value,
            cost_basis,
        }
    }
}

/// An investment account belonging to a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl Account {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            holdings: Vec::new(),
        }
    }

    /// Add a holding to this account.
    pub fn with_holding(mut self, holding: Holding) -> Self {
        self.holdings.push(holding);
        self
    }

    /// Sum of current holding values.
    pub fn current_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.current_value).sum()
    }

    /// Sum of holding cost bases.
    pub fn total_cost(&self) -> f64 {
        self.holdings.iter().map(|h| h.cost_basis).sum()
    }
}

/// Performance report for one portfolio.
///
/// All `*_pct` fields are percentages except `volatility`, which is on the
/// same scale as the period returns it was derived from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerformanceReport {
    pub current_value: f64,
    pub total_cost: f64,
    #[serde(rename = "total_return")]
    pub total_return_pct: f64,
    #[serde(rename = "twr")]
    pub twr_pct: f64,
    #[serde(rename = "mwr")]
    pub mwr_pct: f64,
    #[serde(rename = "volatility")]
    pub volatility_pct: f64,
    pub sharpe_ratio: f64,
    #[serde(rename = "max_drawdown")]
    pub max_drawdown_pct: f64,
}

/// API response wrapper for success cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
