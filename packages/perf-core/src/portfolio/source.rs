//! Read-only access to portfolio data.

use crate::types::{Account, PriceObservation, Transaction};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Narrow read interface over the storage layer.
///
/// Implementations fetch already-persisted records; the analytics never write.
pub trait PortfolioDataSource {
    /// Accounts (with their holdings) belonging to a portfolio.
    fn list_accounts(&self, portfolio_id: &str) -> Result<Vec<Account>>;

    /// Transactions recorded against one of the portfolio's accounts, in any order.
    fn list_transactions(&self, portfolio_id: &str, account_id: &str) -> Result<Vec<Transaction>>;

    /// Price history for a portfolio, in any order.
    fn list_prices(&self, portfolio_id: &str) -> Result<Vec<PriceObservation>>;
}

/// One portfolio's records in an [`InMemorySource`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioRecord {
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Transactions keyed by account id
    #[serde(default)]
    pub transactions: HashMap<String, Vec<Transaction>>,
    #[serde(default)]
    pub prices: Vec<PriceObservation>,
}

/// Data source backed by in-memory fixtures or a JSON snapshot file.
///
/// Snapshot format:
///
/// ```json
/// {
///   "portfolios": {
///     "p1": {
///       "accounts": [{ "id": "a1", "holdings": [{ "symbol": "VTI", "current_value": 1100.0, "cost_basis": 1000.0 }] }],
///       "transactions": { "a1": [{ "type": "buy", "net_amount": 1000.0, "date": "2024-01-02" }] },
///       "prices": [{ "date": "2024-01-02", "close_price": 100.0 }]
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemorySource {
    #[serde(default)]
    portfolios: HashMap<String, PortfolioRecord>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON snapshot from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let source: Self = serde_json::from_str(&content)?;
        tracing::debug!(
            portfolios = source.portfolios.len(),
            "Loaded snapshot from {}",
            path.display()
        );
        Ok(source)
    }

    /// Write the source as a pretty-printed JSON snapshot.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Add an account to a portfolio.
    pub fn with_account(mut self, portfolio_id: &str, account: Account) -> Self {
        self.record_mut(portfolio_id).accounts.push(account);
        self
    }

    /// Add transactions to an account of a portfolio.
    pub fn with_transactions(
        mut self,
        portfolio_id: &str,
        account_id: &str,
        transactions: Vec<Transaction>,
    ) -> Self {
        self.record_mut(portfolio_id)
            .transactions
            .entry(account_id.to_string())
            .or_default()
            .extend(transactions);
        self
    }

    /// Set the price history of a portfolio.
    pub fn with_prices(mut self, portfolio_id: &str, prices: Vec<PriceObservation>) -> Self {
        self.record_mut(portfolio_id).prices = prices;
        self
    }

    /// Portfolio ids known to this source.
    pub fn portfolio_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.portfolios.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn record_mut(&mut self, portfolio_id: &str) -> &mut PortfolioRecord {
        self.portfolios.entry(portfolio_id.to_string()).or_default()
    }
}

impl PortfolioDataSource for InMemorySource {
    fn list_accounts(&self, portfolio_id: &str) -> Result<Vec<Account>> {
        Ok(self
            .portfolios
            .get(portfolio_id)
            .map(|p| p.accounts.clone())
            .unwrap_or_default())
    }

    fn list_transactions(&self, portfolio_id: &str, account_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .portfolios
            .get(portfolio_id)
            .and_then(|p| p.transactions.get(account_id))
            .cloned()
            .unwrap_or_default())
    }

    fn list_prices(&self, portfolio_id: &str) -> Result<Vec<PriceObservation>> {
        Ok(self
            .portfolios
            .get(portfolio_id)
            .map(|p| p.prices.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Holding, TransactionType};
    use crate::Error;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn fixture() -> InMemorySource {
        InMemorySource::new()
            .with_account(
                "p1",
                Account::new("a1", "Brokerage").with_holding(Holding::new("vti", 1100.0, 1000.0)),
            )
            .with_transactions(
                "p1",
                "a1",
                vec![Transaction::new(TransactionType::Buy, 1000.0, day(1))],
            )
            .with_prices(
                "p1",
                vec![
                    PriceObservation::new(day(1), 100.0),
                    PriceObservation::new(day(2), 110.0),
                ],
            )
    }

    #[test]
    fn test_lists_records() {
        let source = fixture();

        let accounts = source.list_accounts("p1").unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].holdings[0].symbol, "VTI");
        assert_eq!(source.list_transactions("p1", "a1").unwrap().len(), 1);
        assert_eq!(source.list_prices("p1").unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_ids_are_empty() {
        let source = fixture();

        assert!(source.list_accounts("nope").unwrap().is_empty());
        assert!(source.list_transactions("p1", "nope").unwrap().is_empty());
        assert!(source.list_prices("nope").unwrap().is_empty());
    }

    #[test]
    fn test_account_ids_scoped_to_portfolio() {
        let source = fixture()
            .with_account("p2", Account::new("a1", "Other household"))
            .with_transactions(
                "p2",
                "a1",
                vec![
                    Transaction::new(TransactionType::Buy, 50.0, day(3)),
                    Transaction::new(TransactionType::Sell, 20.0, day(4)),
                ],
            );

        let p1 = source.list_transactions("p1", "a1").unwrap();
        let p2 = source.list_transactions("p2", "a1").unwrap();

        assert_eq!(p1.len(), 1);
        assert_eq!(p1[0].net_amount, 1000.0);
        assert_eq!(p2.len(), 2);
        assert!(source.list_transactions("p3", "a1").unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshots/portfolio.json");

        fixture().save(&path).unwrap();
        let loaded = InMemorySource::load(&path).unwrap();

        assert_eq!(loaded.portfolio_ids(), vec!["p1".to_string()]);
        assert_eq!(loaded.list_accounts("p1").unwrap()[0].id, "a1");
        assert_eq!(loaded.list_transactions("p1", "a1").unwrap()[0].net_amount, 1000.0);
    }

    #[test]
    fn test_load_rejects_non_numeric_amount() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"portfolios":{"p1":{"transactions":{"a1":[{"type":"buy","net_amount":"lots","date":"2024-02-01"}]}}}}"#,
        )
        .unwrap();

        assert!(matches!(InMemorySource::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = InMemorySource::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
