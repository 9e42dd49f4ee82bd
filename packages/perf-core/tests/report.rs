//! End-to-end report assembly from a JSON snapshot.

use approx::assert_abs_diff_eq;
use perf_core::{
    portfolio::PortfolioDataSource, AnalyticsConfig, Error, InMemorySource,
    PerformanceReportAssembler,
};
use std::fs;
use tempfile::tempdir;

const SNAPSHOT: &str = r#"{
  "portfolios": {
    "household": {
      "accounts": [
        {
          "id": "brokerage",
          "name": "Brokerage",
          "holdings": [
            { "symbol": "VTI", "current_value": 9000.0, "cost_basis": 8000.0 }
          ]
        },
        {
          "id": "ira",
          "holdings": [
            { "symbol": "BND", "current_value": 1800.0, "cost_basis": 2000.0 }
          ]
        }
      ],
      "transactions": {
        "brokerage": [
          { "type": "sell", "net_amount": 2000.0, "date": "2024-01-30" },
          { "type": "buy", "net_amount": 10000.0, "date": "2024-01-01" }
        ],
        "ira": [
          { "type": "transfer_in", "net_amount": 2000.0, "date": "2024-01-15" }
        ]
      },
      "prices": [
        { "date": "2024-01-04", "close_price": 150.0 },
        { "date": "2024-01-01", "close_price": 100.0 },
        { "date": "2024-01-03", "close_price": 80.0 },
        { "date": "2024-01-02", "close_price": 120.0 }
      ]
    }
  }
}"#;

fn load_snapshot() -> InMemorySource {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(&path, SNAPSHOT).unwrap();
    InMemorySource::load(&path).unwrap()
}

#[test]
fn test_report_from_snapshot() {
    let source = load_snapshot();
    let report = PerformanceReportAssembler::new(&source)
        .assemble("household")
        .unwrap();

    assert_eq!(report.current_value, 10800.0);
    assert_eq!(report.total_cost, 10000.0);
    assert_abs_diff_eq!(report.total_return_pct, 8.0, epsilon = 1e-9);

    // Events: +10000 -> 10000, +2000 -> 12000, -2000 -> 10000
    // Both sub-periods give r = 1.0: (1 + 1.0) * (1 + 1.0) - 1
    assert_abs_diff_eq!(report.twr_pct, 300.0, epsilon = 1e-9);
    // Net invested 10000 against 10800
    assert_abs_diff_eq!(report.mwr_pct, 8.0, epsilon = 1e-9);

    // Prices are re-sorted to 100, 120, 80, 150
    assert_abs_diff_eq!(report.max_drawdown_pct, 100.0 / 3.0, epsilon = 1e-9);
    assert!(report.volatility_pct > 0.0);
}

#[test]
fn test_report_json_shape() {
    let source = load_snapshot();
    let report = PerformanceReportAssembler::new(&source)
        .assemble("household")
        .unwrap();

    let value = serde_json::to_value(report).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 8);
    assert_eq!(object["current_value"], 10800.0);
    assert!(object["twr"].is_number());
    assert!(object["max_drawdown"].is_number());
}

#[test]
fn test_failures_are_typed() {
    let source = load_snapshot();
    let assembler = PerformanceReportAssembler::new(&source);

    assert!(matches!(assembler.assemble(""), Err(Error::Validation(_))));
    assert!(matches!(assembler.assemble("nobody"), Err(Error::NotFound(_))));
}

#[test]
fn test_works_through_trait_object() {
    let source = load_snapshot();
    let dynamic: &(dyn PortfolioDataSource + Sync) = &source;
    let config = AnalyticsConfig::default().with_risk_free_rate(0.0);

    let assembler = PerformanceReportAssembler::with_config(dynamic, config);
    let reports = assembler.assemble_many(&["household".to_string()]);

    assert_eq!(reports.len(), 1);
    assert!(reports[0].1.is_ok());
}
