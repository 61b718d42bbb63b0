//! Read-only period views: dashboard figures and the meal matrix.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::period::Period;
use crate::reconciliation::PeriodTotals;
use crate::snapshot::Snapshot;

/// One bar or slice of a per-resident chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentFigure<T> {
    pub resident_id: Uuid,
    pub name: String,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub period: Period,
    pub resident_count: usize,
    pub total_meals: u64,
    pub total_market: f64,
    /// Residents with at least one meal in the period.
    pub meals_by_resident: Vec<ResidentFigure<u64>>,
    /// Residents with market spend in the period.
    pub market_by_resident: Vec<ResidentFigure<f64>>,
}

pub fn dashboard(snapshot: &Snapshot, period: &Period) -> Dashboard {
    let totals = PeriodTotals::of(snapshot, period);

    let mut meals_by_resident = Vec::new();
    let mut market_by_resident = Vec::new();
    for resident in &snapshot.residents {
        let meals: u64 = snapshot
            .meals_in(period)
            .filter(|m| m.resident_id == resident.id)
            .map(|m| u64::from(m.meal_count))
            .sum();
        if meals > 0 {
            meals_by_resident.push(ResidentFigure {
                resident_id: resident.id,
                name: resident.name.clone(),
                value: meals,
            });
        }

        let market: f64 = snapshot
            .market_in(period)
            .filter(|m| m.resident_id == resident.id)
            .map(|m| m.amount)
            .sum();
        if market > 0.0 {
            market_by_resident.push(ResidentFigure {
                resident_id: resident.id,
                name: resident.name.clone(),
                value: market,
            });
        }
    }

    Dashboard {
        period: *period,
        resident_count: snapshot.residents.len(),
        total_meals: totals.total_meals,
        total_market: totals.total_market,
        meals_by_resident,
        market_by_resident,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealMatrixRow {
    pub resident_id: Uuid,
    pub name: String,
    /// Meal count per day of the month; index 0 is the 1st.
    pub days: Vec<u32>,
    pub total: u64,
}

/// Resident-by-day grid of meal counts for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealMatrix {
    pub period: Period,
    pub rows: Vec<MealMatrixRow>,
    pub grand_total: u64,
}

impl MealMatrix {
    /// Count in the cell for `resident_id` on 1-based `day`; 0 when empty.
    pub fn cell(&self, resident_id: Uuid, day: u32) -> u32 {
        let Some(index) = day.checked_sub(1) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|r| r.resident_id == resident_id)
            .and_then(|r| r.days.get(index as usize).copied())
            .unwrap_or(0)
    }
}

pub fn meal_matrix(snapshot: &Snapshot, period: &Period) -> MealMatrix {
    let width = period.days_in_month() as usize;

    let rows: Vec<MealMatrixRow> = snapshot
        .residents
        .iter()
        .map(|resident| {
            let mut days = vec![0u32; width];
            for meal in snapshot
                .meals_in(period)
                .filter(|m| m.resident_id == resident.id)
            {
                if let Some(cell) = days.get_mut(meal.date.day0() as usize) {
                    *cell = meal.meal_count;
                }
            }
            let total = days.iter().map(|&c| u64::from(c)).sum();
            MealMatrixRow {
                resident_id: resident.id,
                name: resident.name.clone(),
                days,
                total,
            }
        })
        .collect();

    let grand_total = rows.iter().map(|r| r.total).sum();
    MealMatrix {
        period: *period,
        rows,
        grand_total,
    }
}
