//! Plan-cost allocation across family members
//!
//! Consumes the parsed summary rows, normalizes every currency cell,
//! resolves the cost-sharing policy and emits one numeric row per member.
//! The Account row's lump sum is consumed here and the row itself dropped
//! from the output.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::currency::{parse_amount, parse_plan, PlanCharge};
use crate::error::BillError;
use crate::row::SummaryRow;

/// How the shared plan lump sum is spread across members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePolicy {
    /// Pool the Account lump sum with every individually priced plan and
    /// split the pool evenly across all members.
    AllMembersEqual,
    /// Included members split the Account lump sum between themselves;
    /// individually priced members keep their own plan price.
    IncludedOnly,
}

impl SharePolicy {
    /// Maps the `plan_cost_for_all_members` configuration flag.
    pub fn from_flag(plan_cost_for_all_members: bool) -> Self {
        if plan_cost_for_all_members {
            Self::AllMembersEqual
        } else {
            Self::IncludedOnly
        }
    }
}

/// One member's final share of the bill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocatedRow {
    pub member: String,
    pub total: f64,
    pub plan_price: f64,
    pub equipment: f64,
    pub services: f64,
    pub one_time_charges: f64,
}

/// A member row with every cell normalized to a number.
struct MemberCharges {
    identifier: String,
    plan: PlanCharge,
    equipment: f64,
    services: f64,
    one_time_charges: f64,
}

/// Allocates the summary table into per-member shares.
///
/// `name_map` substitutes display names for phone identifiers; members
/// absent from the map keep their identifier verbatim.
pub fn allocate(
    rows: &[SummaryRow],
    policy: SharePolicy,
    name_map: &HashMap<String, String>,
) -> Result<Vec<AllocatedRow>, BillError> {
    let mut account: Option<&SummaryRow> = None;
    let mut member_rows: Vec<&SummaryRow> = Vec::new();
    for row in rows {
        if row.is_account() {
            if account.is_some() {
                return Err(BillError::InvalidTableFormat(
                    "more than one Account row in summary table".to_string(),
                ));
            }
            account = Some(row);
        } else {
            member_rows.push(row);
        }
    }
    let account = account.ok_or(BillError::MissingAccountRow)?;
    if member_rows.is_empty() {
        return Err(BillError::InvalidTableFormat(
            "no member rows to allocate".to_string(),
        ));
    }

    // The aggregate plans cell is the lump sum for all Included members.
    let account_lump = match parse_plan(&account.plans)? {
        PlanCharge::Priced(value) => value,
        PlanCharge::Included => {
            return Err(BillError::InvalidTableFormat(
                "Account plan lump sum is not a currency amount".to_string(),
            ))
        }
    };

    let members = member_rows
        .iter()
        .map(|row| {
            Ok(MemberCharges {
                identifier: row.identifier.clone(),
                plan: parse_plan(&row.plans)?,
                equipment: parse_amount(&row.equipment)?,
                services: parse_amount(&row.services)?,
                one_time_charges: parse_amount(&row.one_time_charges)?,
            })
        })
        .collect::<Result<Vec<MemberCharges>, BillError>>()?;

    let included_count = members
        .iter()
        .filter(|m| m.plan == PlanCharge::Included)
        .count();
    let individual_sum: f64 = members
        .iter()
        .filter_map(|m| match m.plan {
            PlanCharge::Priced(value) => Some(value),
            PlanCharge::Included => None,
        })
        .sum();

    let per_capita = (account_lump + individual_sum) / members.len() as f64;
    // Single quotient so every included member sees the identical share.
    let per_included = if included_count > 0 {
        account_lump / included_count as f64
    } else {
        0.0
    };

    let allocated: Vec<AllocatedRow> = members
        .into_iter()
        .map(|m| {
            let plan_price = match policy {
                SharePolicy::AllMembersEqual => per_capita,
                SharePolicy::IncludedOnly => match m.plan {
                    PlanCharge::Included => per_included,
                    PlanCharge::Priced(value) => value,
                },
            };
            let member = name_map
                .get(&m.identifier)
                .cloned()
                .unwrap_or(m.identifier);
            AllocatedRow {
                member,
                total: plan_price + m.equipment + m.services + m.one_time_charges,
                plan_price,
                equipment: m.equipment,
                services: m.services,
                one_time_charges: m.one_time_charges,
            }
        })
        .collect();

    let total: f64 = allocated.iter().map(|row| row.total).sum();
    info!(
        "Allocated {} member shares, summing to ${:.2}",
        allocated.len(),
        total
    );
    Ok(allocated)
}
