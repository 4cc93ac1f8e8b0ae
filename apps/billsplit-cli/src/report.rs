//! Plain-text summary rendering
//!
//! Produces the aligned, dotted-leader table the summary mail carries:
//!
//! ```text
//! -----------------------------
//! Member.............Amount
//! -----------------------------
//! Alice..............$103.33
//! ...
//! -----------------------------
//! Total bill.........$325.53
//! -----------------------------
//! ```
//!
//! The engine guarantees the numbers; this is presentation only.

use bill_engine::AllocatedRow;

/// Dotted leader between the member column and the amount.
const MIDDLE_DOTS: usize = 10;
/// Nominal width of a formatted amount, for the horizontal rules.
const AMOUNT_WIDTH: usize = 6;
/// Footer label, also the minimum member-column width.
const FOOTER_LABEL: &str = "Total bill";

/// Groups an unsigned digit string into thousands: "1234567" → "1,234,567".
fn group_thousands(mut digits: String) -> String {
    let mut tail = String::new();
    while digits.len() > 3 {
        let split = digits.len() - 3;
        tail = format!(",{}{}", &digits[split..], tail);
        digits.truncate(split);
    }
    format!("{digits}{tail}")
}

/// Formats an amount as `$1,234.56`.
fn dollars(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let grouped = group_thousands((cents / 100).to_string());
    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

/// Renders the member table with dotted leaders and a grand-total footer.
pub fn render_summary(rows: &[AllocatedRow], billing_period: Option<&str>) -> String {
    let total: f64 = rows.iter().map(|row| row.total).sum();

    let member_width = rows
        .iter()
        .map(|row| row.member.len())
        .max()
        .unwrap_or(0)
        .max(FOOTER_LABEL.len());
    let rule = "-".repeat(member_width + MIDDLE_DOTS + AMOUNT_WIDTH + 7);
    let leader = ".".repeat(MIDDLE_DOTS);

    let mut out = String::new();
    if let Some(period) = billing_period {
        out.push_str(&format!("Bill for {period}\n"));
    }
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("{:.<member_width$}{leader}Amount\n", "Member"));
    out.push_str(&format!("{rule}\n"));
    for row in rows {
        out.push_str(&format!(
            "{:.<member_width$}{leader}{}\n",
            row.member,
            dollars(row.total)
        ));
    }
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "{:.<member_width$}{leader}{}\n",
        FOOTER_LABEL,
        dollars(total)
    ));
    out.push_str(&format!("{rule}\n"));
    out
}
