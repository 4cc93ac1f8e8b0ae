//! Output artifacts
//!
//! The summary CSV is the contract consumed by the reporting collaborator;
//! its schema and numeric correctness are guaranteed here. The billing-period
//! label goes to a plain-text side file. Both are written only after
//! reconciliation has passed.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::allocate::AllocatedRow;
use crate::error::BillError;

/// Writes the per-member summary CSV.
///
/// Header: `member,total,plan_price,equipment,services,one_time_charges`.
/// Amounts are plain decimal numbers without a currency symbol, at full
/// float precision.
pub fn write_summary_csv(path: impl AsRef<Path>, rows: &[AllocatedRow]) -> Result<(), BillError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Summary written to {}", path.display());
    Ok(())
}

/// Writes the billing-period label side file.
pub fn write_billing_period(path: impl AsRef<Path>, label: &str) -> Result<(), BillError> {
    let path = path.as_ref();
    fs::write(path, label)?;
    info!("Billing period written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<AllocatedRow> {
        vec![
            AllocatedRow {
                member: "Alice".to_string(),
                total: 103.33,
                plan_price: 93.33,
                equipment: 10.0,
                services: 0.0,
                one_time_charges: 0.0,
            },
            AllocatedRow {
                member: "(555) 123-4004".to_string(),
                total: 30.0,
                plan_price: 30.0,
                equipment: 0.0,
                services: 0.0,
                one_time_charges: 0.0,
            },
        ]
    }

    #[test]
    fn test_csv_schema_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, &rows()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("member,total,plan_price,equipment,services,one_time_charges")
        );
        assert_eq!(lines.next(), Some("Alice,103.33,93.33,10.0,0.0,0.0"));
        assert_eq!(
            lines.next(),
            Some("(555) 123-4004,30.0,30.0,0.0,0.0,0.0")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        write_summary_csv(&first, &rows()).unwrap();
        write_summary_csv(&second, &rows()).unwrap();
        assert_eq!(
            fs::read(&first).unwrap(),
            fs::read(&second).unwrap()
        );
    }

    #[test]
    fn test_billing_period_side_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billing_month.txt");
        write_billing_period(&path, "Apr 2025").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Apr 2025");
    }
}
