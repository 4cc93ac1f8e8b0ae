//! Currency cell normalization
//!
//! Bill cells arrive as loosely formatted strings: `$1,234.56`, `-$280.83`,
//! the placeholder `-` meaning zero, or the literal `Included` in the plans
//! column. Numeric cells funnel through [`parse_amount`]; the plans column
//! goes through [`parse_plan`] so `Included` never reaches the numeric path.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::BillError;

lazy_static! {
    /// USD amount with optional sign, dollar sign and thousands separators
    static ref AMOUNT_PATTERN: Regex =
        Regex::new(r"[-+]?\$?\d{1,4}(?:,\d{3})*(?:\.\d+)?").unwrap();
}

/// A plans-column value: bundled into the Account lump sum, or individually
/// priced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanCharge {
    Included,
    Priced(f64),
}

/// Converts a raw currency cell to a number.
///
/// The placeholder `-` means zero. A cell matching no USD pattern is a hard
/// error carrying the offending value; malformed cells fail here rather than
/// surfacing later as a nonsensical arithmetic result.
pub fn parse_amount(raw: &str) -> Result<f64, BillError> {
    let raw = raw.trim();
    if raw == "-" {
        return Ok(0.0);
    }

    let matched = AMOUNT_PATTERN
        .find(raw)
        .ok_or_else(|| BillError::Currency(raw.to_string()))?;

    let cleaned: String = matched
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    cleaned
        .parse::<f64>()
        .map_err(|_| BillError::Currency(raw.to_string()))
}

/// Normalizes a plans cell, branching on `Included` before any numeric
/// parsing.
pub fn parse_plan(raw: &str) -> Result<PlanCharge, BillError> {
    if raw.trim() == "Included" {
        return Ok(PlanCharge::Included);
    }
    parse_amount(raw).map(PlanCharge::Priced)
}
