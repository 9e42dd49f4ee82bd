//! Cashflow assembly from raw account transactions.

use crate::types::{CashflowEvent, Transaction};
use crate::{ensure_finite, Result};

/// Turn transactions into a date-ordered sequence of cashflow events.
///
/// Buys and transfers in contribute `+net_amount`; sells and transfers out
/// contribute `-|net_amount|`. Each event's `resulting_value` is the running
/// account value after applying its cashflow, starting from zero.
///
/// Sorting is stable, so transactions sharing a date keep their input order.
///
/// # Errors
///
/// Returns `Error::Computation` if any net amount is NaN or infinite.
pub fn assemble_cashflows(transactions: &[Transaction]) -> Result<Vec<CashflowEvent>> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| t.date);

    let mut value = 0.0;
    let mut events = Vec::with_capacity(ordered.len());

    for tx in ordered {
        ensure_finite(tx.net_amount, "transaction net amount")?;

        let cashflow = tx.signed_amount();
        value += cashflow;
        events.push(CashflowEvent::new(tx.date, cashflow, value));
    }

    tracing::debug!(events = events.len(), final_value = value, "Assembled cashflows");
    Ok(events)
}

/// Copy of `events` sorted ascending by date (stable).
pub(crate) fn sorted_events(events: &[CashflowEvent]) -> Vec<CashflowEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.date);
    sorted
}
