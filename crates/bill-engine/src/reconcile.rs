//! Independent grand-total check
//!
//! The bill's stated TOTAL DUE is extracted separately from the summary
//! table and compared against the sum of allocated totals. A mismatch means
//! a parsing or allocation bug and stops the pipeline before any output is
//! treated as final.

use tracing::info;

use crate::allocate::AllocatedRow;
use crate::currency::parse_amount;
use crate::error::BillError;

/// Anchor preceding the stated grand total.
const TOTAL_DUE_ANCHOR: &str = "TOTAL DUE";
/// Tolerance for the computed-vs-stated comparison.
const TOLERANCE: f64 = 1e-6;

/// Reads the bill's stated grand total: the first non-empty line following
/// the first "TOTAL DUE" occurrence.
pub fn stated_total(lines: &[String]) -> Result<f64, BillError> {
    let idx = lines
        .iter()
        .position(|line| line == TOTAL_DUE_ANCHOR)
        .ok_or_else(|| BillError::TableNotFound(TOTAL_DUE_ANCHOR.to_string()))?;
    let value_line = lines.get(idx + 1).ok_or_else(|| {
        BillError::InvalidTableFormat("no amount follows TOTAL DUE".to_string())
    })?;
    parse_amount(value_line)
}

/// Asserts that the allocated totals sum to the stated grand total.
pub fn reconcile(rows: &[AllocatedRow], stated: f64) -> Result<(), BillError> {
    let computed: f64 = rows.iter().map(|row| row.total).sum();
    if (computed - stated).abs() >= TOLERANCE {
        return Err(BillError::ReconciliationMismatch { computed, stated });
    }
    info!("Reconciled: allocated totals sum to ${computed:.2}");
    Ok(())
}
