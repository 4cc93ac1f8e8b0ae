//! End-to-end pipeline tests over a synthetic bill page
//!
//! Drives locate → parse → allocate → reconcile on fixture text, checking
//! the invariant the whole crate exists for: the allocated member totals
//! sum to the bill's independently stated TOTAL DUE.

use std::collections::HashMap;

use bill_engine::{
    allocate, locate_summary_table, parse_table_window, reconcile, stated_total, BillError,
    SharePolicy,
};

const FAMILY_COUNT: usize = 4;

fn summary_page() -> Vec<String> {
    [
        "Apr 03, 2025",
        "THIS BILL SUMMARY",
        "Line Type Plans Equipment Services One-time charges Total",
        "Account $280.00 - $0.00 - $280.00",
        "(555) 123-4001 Voice Included $10.00 - - $103.33",
        "(555) 123-4002 Voice Included - $5.00 - $98.33",
        "(555) 123-4003 Voice Included - - $0.53 $93.86",
        "(555) 123-4004 Voice $30.00 - - - $30.00",
        "T otals $310.00 $10.00 $5.00 $0.53 $325.53",
        "DETAILED CHARGES",
        "Account charges and credits",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn front_page() -> Vec<String> {
    [
        "Hi Jane,",
        "Here's your bill for Apr 2025.",
        "TOTAL DUE",
        "$325.53",
        "AutoPay is scheduled",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn run_pipeline(policy: SharePolicy) -> Result<f64, BillError> {
    let window = locate_summary_table(&summary_page(), FAMILY_COUNT)?;
    let parsed = parse_table_window(&window, FAMILY_COUNT);
    let rows = allocate(&parsed, policy, &HashMap::new())?;
    let stated = stated_total(&front_page())?;
    reconcile(&rows, stated)?;
    Ok(stated)
}

#[test]
fn pipeline_reconciles_under_equal_split_policy() {
    assert_eq!(run_pipeline(SharePolicy::AllMembersEqual).unwrap(), 325.53);
}

#[test]
fn pipeline_reconciles_under_included_only_policy() {
    assert_eq!(run_pipeline(SharePolicy::IncludedOnly).unwrap(), 325.53);
}

#[test]
fn pipeline_is_deterministic() {
    let window = locate_summary_table(&summary_page(), FAMILY_COUNT).unwrap();
    let parsed = parse_table_window(&window, FAMILY_COUNT);
    let first = allocate(&parsed, SharePolicy::IncludedOnly, &HashMap::new()).unwrap();
    let second = allocate(&parsed, SharePolicy::IncludedOnly, &HashMap::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn perturbed_lump_sum_fails_reconciliation() {
    // Inflate the Account lump by one cent beyond the true figure
    let mut page = summary_page();
    page[3] = "Account $280.01 - $0.00 - $280.01".to_string();

    let window = locate_summary_table(&page, FAMILY_COUNT).unwrap();
    let parsed = parse_table_window(&window, FAMILY_COUNT);
    let rows = allocate(&parsed, SharePolicy::IncludedOnly, &HashMap::new()).unwrap();
    let stated = stated_total(&front_page()).unwrap();

    let err = reconcile(&rows, stated).unwrap_err();
    assert!(matches!(err, BillError::ReconciliationMismatch { .. }));
}

#[test]
fn name_map_flows_through_to_allocated_rows() {
    let names: HashMap<String, String> = [
        ("(555) 123-4001".to_string(), "Alice".to_string()),
        ("(555) 123-4002".to_string(), "Bob".to_string()),
        ("(555) 123-4003".to_string(), "Carol".to_string()),
        ("(555) 123-4004".to_string(), "Dan".to_string()),
    ]
    .into_iter()
    .collect();

    let window = locate_summary_table(&summary_page(), FAMILY_COUNT).unwrap();
    let parsed = parse_table_window(&window, FAMILY_COUNT);
    let rows = allocate(&parsed, SharePolicy::AllMembersEqual, &names).unwrap();

    let members: Vec<&str> = rows.iter().map(|r| r.member.as_str()).collect();
    assert_eq!(members, vec!["Alice", "Bob", "Carol", "Dan"]);
}

#[test]
fn token_grid_layout_reconciles_too() {
    // The flat layout: no THIS BILL SUMMARY header; the grid starts at the
    // second bare "Account" line and tokens wrap mid-row.
    let page: Vec<String> = [
        "ACCOUNT OVERVIEW",
        "Account",
        "Lines and charges",
        "Account",
        "$280.00 - $0.00 -",
        "$280.00 - -",
        "(555) 123-4001 Voice Included",
        "$10.00 - - $103.33",
        "(555) 123-4002 Voice Included - $5.00",
        "- $98.33",
        "(555) 123-4003 Voice",
        "Included - - $0.53 $93.86",
        "(555) 123-4004 Voice $30.00 - - - $30.00",
        "DETAILED CHARGES",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let window = locate_summary_table(&page, FAMILY_COUNT).unwrap();
    let parsed = parse_table_window(&window, FAMILY_COUNT);
    assert_eq!(parsed.len(), FAMILY_COUNT + 1);

    let rows = allocate(&parsed, SharePolicy::IncludedOnly, &HashMap::new()).unwrap();
    let stated = stated_total(&front_page()).unwrap();
    reconcile(&rows, stated).unwrap();
}
