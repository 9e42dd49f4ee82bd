//! Portfolio return calculations.

use super::cashflow::sorted_events;
use crate::types::CashflowEvent;
use crate::{ensure_finite, Result};

/// Time-weighted return of a cashflow sequence, in percent.
///
/// Events are re-sorted by date. For each adjacent pair the sub-period return
/// is `r = (end_value - flow) / start_value` where `flow` is the later event's
/// cashflow, and the compounding factor is multiplied by `1 + r`. Sub-periods
/// whose start value is not positive are skipped (factor 1). This keeps fully
/// liquidated stretches from producing NaN; it is a simplification, not an
/// attempt to value them.
///
/// Zero or one event yields 0.
///
/// # Errors
///
/// Returns `Error::Computation` if any cashflow or value is not finite.
pub fn time_weighted_return(events: &[CashflowEvent]) -> Result<f64> {
    validate_events(events)?;

    if events.len() < 2 {
        return Ok(0.0);
    }

    let events = sorted_events(events);
    let mut factor = 1.0;
    let mut skipped = 0usize;

    for pair in events.windows(2) {
        let start_value = pair[0].resulting_value;
        let end_value = pair[1].resulting_value;
        let flow = pair[1].cashflow;

        if start_value > 0.0 {
            let r = (end_value - flow) / start_value;
            factor *= 1.0 + r;
        } else {
            skipped += 1;
        }
    }

    tracing::debug!(
        periods = events.len() - 1,
        skipped,
        factor,
        "Linked time-weighted sub-periods"
    );

    Ok((factor - 1.0) * 100.0)
}

/// Approximate money-weighted return, in percent.
///
/// `net_invested` is the sum of positive cashflows minus the absolute sum of
/// negative ones; the result is `(current_value - net_invested) / net_invested`.
/// Flow timing is ignored, so this is not an IRR. Returns 0 when net invested
/// capital is zero or negative.
///
/// # Errors
///
/// Returns `Error::Computation` if any input is not finite.
pub fn money_weighted_return(events: &[CashflowEvent], current_value: f64) -> Result<f64> {
    validate_events(events)?;
    ensure_finite(current_value, "current value")?;

    let total_invested: f64 = events
        .iter()
        .map(|e| e.cashflow)
        .filter(|&c| c > 0.0)
        .sum();
    let total_withdrawn: f64 = events
        .iter()
        .map(|e| e.cashflow)
        .filter(|&c| c < 0.0)
        .sum::<f64>()
        .abs();
    let net_invested = total_invested - total_withdrawn;

    if net_invested <= 0.0 {
        if !events.is_empty() {
            tracing::warn!(net_invested, "Net invested capital is not positive, MWR set to 0");
        }
        return Ok(0.0);
    }

    Ok((current_value - net_invested) / net_invested * 100.0)
}

fn validate_events(events: &[CashflowEvent]) -> Result<()> {
    for event in events {
        ensure_finite(event.cashflow, "cashflow")?;
        ensure_finite(event.resulting_value, "resulting value")?;
    }
    Ok(())
}
