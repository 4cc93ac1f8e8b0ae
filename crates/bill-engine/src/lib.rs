//! Phone-bill summary extraction and family cost allocation
//!
//! Turns the loosely delimited text of a PDF phone bill into a validated
//! per-member charge table whose totals provably sum to the bill's stated
//! grand total.
//!
//! The pipeline runs strictly forward, each stage testable in isolation:
//! extraction → table location → row parsing → allocation → reconciliation.

pub mod allocate;
pub mod artifact;
pub mod currency;
pub mod error;
pub mod extract;
pub mod locate;
pub mod reconcile;
pub mod row;

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

pub use allocate::{allocate, AllocatedRow, SharePolicy};
pub use currency::{parse_amount, parse_plan, PlanCharge};
pub use error::BillError;
pub use extract::BillDocument;
pub use locate::locate_summary_table;
pub use reconcile::{reconcile, stated_total};
pub use row::{parse_row, parse_table_window, SummaryRow};

/// Inputs for one bill analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Zero-based page holding the summary table.
    pub summary_page: usize,
    /// Zero-based page holding the billing period and TOTAL DUE.
    pub front_page: usize,
    /// Expected member count, used to validate the table shape.
    pub family_count: usize,
    /// Plan cost-sharing policy.
    pub policy: SharePolicy,
    /// Optional phone-number → display-name mapping.
    pub member_names: HashMap<String, String>,
}

/// The validated analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct BillSummary {
    /// One row per member, reconciled against the stated total.
    pub rows: Vec<AllocatedRow>,
    /// The bill's stated grand total.
    pub grand_total: f64,
    /// Billing-period label from the front page, when present.
    pub billing_period: Option<String>,
}

/// Runs the full pipeline on one bill.
///
/// Fails before any artifact is written if the table cannot be located and
/// parsed, or if the allocated totals do not reconcile against the stated
/// grand total.
pub fn analyze_bill(
    path: impl AsRef<Path>,
    options: &AnalysisOptions,
) -> Result<BillSummary, BillError> {
    let document = BillDocument::open(path)?;
    let billing_period = document.billing_period(options.front_page);

    let summary_lines = document.page_lines(options.summary_page)?;
    let window = locate_summary_table(&summary_lines, options.family_count)?;
    let parsed = parse_table_window(&window, options.family_count);
    if parsed.is_empty() {
        return Err(BillError::InvalidTableStructure(
            "no recognizable rows in the located table".to_string(),
        ));
    }

    let rows = allocate(&parsed, options.policy, &options.member_names)?;

    let front_lines = document.page_lines(options.front_page)?;
    let grand_total = stated_total(&front_lines)?;
    reconcile(&rows, grand_total)?;

    info!(
        "Allocated {} member shares totalling ${:.2}",
        rows.len(),
        grand_total
    );
    Ok(BillSummary {
        rows,
        grand_total,
        billing_period,
    })
}
