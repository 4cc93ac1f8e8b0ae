//! Locating the billing summary table inside extracted page text
//!
//! Upstream PDF text layout varies across bill format versions, so two
//! anchor strategies are tried in order:
//! - header-delimited: the window between "THIS BILL SUMMARY" and
//!   "DETAILED CHARGES", with the column-header line skipped;
//! - token-grid: from the second "Account" occurrence to "DETAILED CHARGES",
//!   reshaping the flat token stream back into fixed-width rows.
//!
//! Both are pure functions over the line sequence.

use tracing::{debug, warn};

use crate::error::BillError;

/// Start anchor of the header-delimited layout.
const SUMMARY_ANCHOR: &str = "THIS BILL SUMMARY";
/// End anchor shared by both layouts.
const DETAILED_ANCHOR: &str = "DETAILED CHARGES";
/// Start anchor of the token-grid layout; the first occurrence is page
/// furniture, the table begins at the second.
const ACCOUNT_ANCHOR: &str = "Account";
/// Fixed column count every row normalizes to.
const COLUMN_COUNT: usize = 7;

/// Index of the nth (1-based) line exactly equal to `target`.
fn find_nth_occurrence(lines: &[String], target: &str, n: usize) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.as_str() == target)
        .map(|(idx, _)| idx)
        .nth(n.checked_sub(1)?)
}

/// A "Totals" footer leaks into the window on some renderings, sometimes
/// with a space split into the word. It is an artifact, not a data row.
fn is_totals_artifact(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("Totals") || line.starts_with("T otals")
}

/// Finds the window of candidate row lines for the summary table.
///
/// The header-delimited strategy is tried first; the token-grid fallback
/// covers the older flat layout.
pub fn locate_summary_table(
    lines: &[String],
    family_count: usize,
) -> Result<Vec<String>, BillError> {
    match locate_by_header(lines) {
        Ok(window) => Ok(window),
        Err(err) => {
            debug!("Header-delimited layout not found ({err}); trying token grid");
            locate_by_token_grid(lines, family_count)
        }
    }
}

/// Strategy (a): exact "THIS BILL SUMMARY" line, skip the column-header row
/// beneath it, end at "DETAILED CHARGES" (exclusive).
fn locate_by_header(lines: &[String]) -> Result<Vec<String>, BillError> {
    let summary_idx = find_nth_occurrence(lines, SUMMARY_ANCHOR, 1)
        .ok_or_else(|| BillError::TableNotFound(SUMMARY_ANCHOR.to_string()))?;
    let detailed_idx = find_nth_occurrence(lines, DETAILED_ANCHOR, 1)
        .ok_or_else(|| BillError::TableNotFound(DETAILED_ANCHOR.to_string()))?;

    // +2 skips the anchor itself and the column-header row.
    let start = summary_idx + 2;
    if detailed_idx <= start {
        return Err(BillError::TableNotFound(DETAILED_ANCHOR.to_string()));
    }

    let mut window = Vec::with_capacity(detailed_idx - start);
    for line in &lines[start..detailed_idx] {
        if is_totals_artifact(line) {
            warn!("Skipping Totals artifact row: {line:?}");
            continue;
        }
        window.push(line.clone());
    }
    Ok(window)
}

/// Strategy (b): reconstruct rows from a flat token stream.
///
/// The window runs from the second "Account" line to "DETAILED CHARGES".
/// Row width is inferred from the total token count; widths under the fixed
/// column count are padded with a `-` placeholder inserted second-to-last.
/// This reshape is best-effort recovery, so a non-divisible token count
/// surfaces observed and expected counts rather than an opaque failure.
fn locate_by_token_grid(
    lines: &[String],
    family_count: usize,
) -> Result<Vec<String>, BillError> {
    let start = find_nth_occurrence(lines, ACCOUNT_ANCHOR, 2)
        .ok_or_else(|| BillError::TableNotFound(ACCOUNT_ANCHOR.to_string()))?;
    let end = find_nth_occurrence(lines, DETAILED_ANCHOR, 1)
        .ok_or_else(|| BillError::TableNotFound(DETAILED_ANCHOR.to_string()))?;
    if end <= start {
        return Err(BillError::TableNotFound(DETAILED_ANCHOR.to_string()));
    }

    let mut tokens: Vec<&str> = Vec::new();
    for line in &lines[start..end] {
        if is_totals_artifact(line) {
            warn!("Skipping Totals artifact row: {line:?}");
            continue;
        }
        tokens.extend(line.split_whitespace());
    }

    let rows = family_count + 1;
    if tokens.is_empty() || tokens.len() % rows != 0 {
        return Err(BillError::TableShape {
            observed: tokens.len(),
            rows,
        });
    }

    let width = tokens.len() / rows;
    let mut window = Vec::with_capacity(rows);
    for chunk in tokens.chunks(width) {
        let mut cells: Vec<&str> = chunk.to_vec();
        while cells.len() < COLUMN_COUNT {
            cells.insert(cells.len() - 1, "-");
        }
        window.push(cells.join(" "));
    }

    debug!(
        "Token grid reshaped into {} rows of {} columns",
        rows,
        width.max(COLUMN_COUNT)
    );
    Ok(window)
}
