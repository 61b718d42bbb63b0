//! Settlement of a period's meals and market spend among residents.
//!
//! Two policies are provided and intentionally kept apart:
//!
//! - [`market_only_settlement`] (monthly reports): the meal rate is the
//!   market total over the meal total and fixed fees play no part.
//! - [`full_settlement`] (detailed calculation): a fixed fee is added to
//!   the expense pool and also credited back to every resident in equal
//!   shares, so balances sum to zero whenever meals were logged.
//!
//! With no meals in the period the rate is 0, never NaN or infinity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::period::Period;
use crate::snapshot::Snapshot;

/// Which way a balance settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceStatus {
    /// The resident owes the house.
    Owed,
    /// The house returns money to the resident.
    Return,
}

impl BalanceStatus {
    pub fn of(balance: f64) -> Self {
        if balance < 0.0 {
            BalanceStatus::Owed
        } else {
            BalanceStatus::Return
        }
    }
}

/// Period totals shared by both policies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodTotals {
    pub total_meals: u64,
    pub total_market: f64,
}

impl PeriodTotals {
    pub fn of(snapshot: &Snapshot, period: &Period) -> Self {
        Self {
            total_meals: snapshot
                .meals_in(period)
                .map(|m| u64::from(m.meal_count))
                .sum(),
            total_market: snapshot.market_in(period).map(|m| m.amount).sum(),
        }
    }
}

/// Cost per meal for an expense pool, or 0 when nothing was eaten.
pub fn meal_rate(total_expense: f64, total_meals: u64) -> f64 {
    if total_meals > 0 {
        total_expense / total_meals as f64
    } else {
        0.0
    }
}

/// One resident's meals and market spend within a period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct ResidentUsage {
    meals: u64,
    market: f64,
}

fn usage(snapshot: &Snapshot, period: &Period, resident_id: Uuid) -> ResidentUsage {
    ResidentUsage {
        meals: snapshot
            .meals_in(period)
            .filter(|m| m.resident_id == resident_id)
            .map(|m| u64::from(m.meal_count))
            .sum(),
        market: snapshot
            .market_in(period)
            .filter(|m| m.resident_id == resident_id)
            .map(|m| m.amount)
            .sum(),
    }
}

// ---------------------------------------------------------------------------
// Market-only settlement (monthly report)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub resident_id: Uuid,
    pub name: String,
    pub total_meals: u64,
    pub total_market: f64,
    pub meal_cost: f64,
    pub balance: f64,
}

impl ReportRow {
    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::of(self.balance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub period: Period,
    pub total_meals: u64,
    pub total_market: f64,
    pub meal_rate: f64,
    pub rows: Vec<ReportRow>,
}

/// Settle a period on market spend alone.
///
/// Each resident is charged `meals * rate` against what they spent at
/// the market.
pub fn market_only_settlement(snapshot: &Snapshot, period: &Period) -> MonthlyReport {
    let totals = PeriodTotals::of(snapshot, period);
    let rate = meal_rate(totals.total_market, totals.total_meals);

    let rows = snapshot
        .residents
        .iter()
        .map(|resident| {
            let used = usage(snapshot, period, resident.id);
            let meal_cost = used.meals as f64 * rate;
            ReportRow {
                resident_id: resident.id,
                name: resident.name.clone(),
                total_meals: used.meals,
                total_market: used.market,
                meal_cost,
                balance: used.market - meal_cost,
            }
        })
        .collect();

    MonthlyReport {
        period: *period,
        total_meals: totals.total_meals,
        total_market: totals.total_market,
        meal_rate: rate,
        rows,
    }
}

// ---------------------------------------------------------------------------
// Full settlement with fixed-fee distribution (detailed calculation)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRow {
    pub resident_id: Uuid,
    pub name: String,
    pub total_meals: u64,
    pub total_market: f64,
    pub meal_cost: f64,
    pub fixed_share: f64,
    /// Market spend plus the fixed-fee share.
    pub total_deposit: f64,
    pub balance: f64,
}

impl SettlementRow {
    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::of(self.balance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSheet {
    pub period: Period,
    pub total_meals: u64,
    pub total_market: f64,
    pub fixed_fee: f64,
    /// Market total plus the fixed fee.
    pub total_expense: f64,
    pub meal_rate: f64,
    pub fixed_share: f64,
    pub rows: Vec<SettlementRow>,
}

impl SettlementSheet {
    pub fn total_meal_cost(&self) -> f64 {
        self.rows.iter().map(|r| r.meal_cost).sum()
    }

    pub fn total_balance(&self) -> f64 {
        self.rows.iter().map(|r| r.balance).sum()
    }
}

/// Settle a period with `fixed_fee` folded into the meal rate and split
/// equally across residents as a deposit.
///
/// The fee is expected to be non-negative; callers validate it.
pub fn full_settlement(snapshot: &Snapshot, period: &Period, fixed_fee: f64) -> SettlementSheet {
    let totals = PeriodTotals::of(snapshot, period);
    let total_expense = totals.total_market + fixed_fee;
    let rate = meal_rate(total_expense, totals.total_meals);
    let resident_count = snapshot.residents.len().max(1);
    let fixed_share = fixed_fee / resident_count as f64;

    let rows = snapshot
        .residents
        .iter()
        .map(|resident| {
            let used = usage(snapshot, period, resident.id);
            let meal_cost = used.meals as f64 * rate;
            let total_deposit = used.market + fixed_share;
            SettlementRow {
                resident_id: resident.id,
                name: resident.name.clone(),
                total_meals: used.meals,
                total_market: used.market,
                meal_cost,
                fixed_share,
                total_deposit,
                balance: total_deposit - meal_cost,
            }
        })
        .collect();

    SettlementSheet {
        period: *period,
        total_meals: totals.total_meals,
        total_market: totals.total_market,
        fixed_fee,
        total_expense,
        meal_rate: rate,
        fixed_share,
        rows,
    }
}

/// Sum of the period's bills, usable as the fixed fee of
/// [`full_settlement`].
pub fn fixed_fee_from_bills(snapshot: &Snapshot, period: &Period) -> f64 {
    snapshot.bills_in(period).map(|b| b.amount).sum()
}
