//! Row classification for the bill summary table
//!
//! Each raw line is one of two recognized shapes, both normalized to the
//! same 7 fields:
//! - the aggregate row: `Account $280.00 - $0.00 - $280.00`
//! - a member row: `(999) 637-3009 Voice Included - - $0.53 $0.53`
//!
//! Everything else on the page (headers, footnotes) is furniture and is
//! dropped.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

lazy_static! {
    /// Member line: phone number, the literal "Voice", then the charge cells
    static ref MEMBER_ROW_PATTERN: Regex =
        Regex::new(r"^\((\d+)\)\s*(\d+)-(\d+)\s+Voice\s+(.+)$").unwrap();
}

/// Identifier of the single aggregate row.
pub const ACCOUNT_IDENTIFIER: &str = "Account";

/// One row of the bill summary table, cells still raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub identifier: String,
    pub line_type: String,
    pub plans: String,
    pub equipment: String,
    pub services: String,
    pub one_time_charges: String,
    pub total: String,
}

impl SummaryRow {
    /// Whether this is the aggregate row holding the shared plan lump sum.
    pub fn is_account(&self) -> bool {
        self.identifier == ACCOUNT_IDENTIFIER
    }
}

/// Classifies one raw line into a summary row, or `None` for page furniture.
pub fn parse_row(line: &str) -> Option<SummaryRow> {
    // PDF text extraction leaves non-breaking spaces inside phone numbers.
    let line = line.trim().replace('\u{a0}', " ");

    if line.starts_with(ACCOUNT_IDENTIFIER) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 6 {
            return None;
        }
        return Some(SummaryRow {
            identifier: ACCOUNT_IDENTIFIER.to_string(),
            line_type: String::new(),
            plans: parts[1].to_string(),
            equipment: parts[2].to_string(),
            services: parts[3].to_string(),
            one_time_charges: parts[4].to_string(),
            total: parts[5].to_string(),
        });
    }

    let caps = MEMBER_ROW_PATTERN.captures(&line)?;
    let identifier = format!("({}) {}-{}", &caps[1], &caps[2], &caps[3]);
    let cells: Vec<&str> = caps[4].split_whitespace().collect();
    if cells.len() < 5 {
        return None;
    }
    Some(SummaryRow {
        identifier,
        line_type: "Voice".to_string(),
        plans: cells[0].to_string(),
        equipment: cells[1].to_string(),
        services: cells[2].to_string(),
        one_time_charges: cells[3].to_string(),
        total: cells[4].to_string(),
    })
}

/// Parses every line of a located table window.
///
/// The parsed-row count is checked against `family_count + 1` (the members
/// plus the aggregate row). Drift usually means layout movement or a stale
/// family_count setting; it is logged and allocation proceeds on whatever
/// rows were found.
pub fn parse_table_window(window: &[String], family_count: usize) -> Vec<SummaryRow> {
    let rows: Vec<SummaryRow> = window.iter().filter_map(|line| parse_row(line)).collect();

    let expected = family_count + 1;
    if rows.len() != expected {
        warn!(
            "Expected {} summary rows but parsed {}; check the family_count setting",
            expected,
            rows.len()
        );
    }
    rows
}
