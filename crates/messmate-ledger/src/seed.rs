//! Sample household shown to guest sessions.

use chrono::NaiveDate;
use messmate_core::models::GUEST_TENANT_ID;
use messmate_core::models::bill::BillRecord;
use messmate_core::models::market::MarketRecord;
use messmate_core::models::meal::MealRecord;
use messmate_core::models::resident::Resident;
use messmate_core::period::Period;
use messmate_core::snapshot::Snapshot;
use uuid::Uuid;

const RESIDENTS: [&str; 3] = ["Rahim Uddin", "Karim Hasan", "Nadia Islam"];

/// Meal counts per resident for the first days of the month.
const MEALS: [[u32; 3]; 3] = [[2, 3, 2], [3, 3, 1], [2, 0, 3]];

/// (resident index, day of month, amount, description)
const MARKET: [(usize, u32, f64, &str); 3] = [
    (0, 1, 850.0, "Rice, lentils and oil"),
    (1, 2, 420.0, "Vegetables and eggs"),
    (2, 3, 610.0, "Fish and spices"),
];

/// Residents, meals, market entries and a bill dated in the month that
/// contains `today`, all owned by the guest tenant.
pub fn sample_household(today: NaiveDate) -> Snapshot {
    let period = Period::containing(today);
    let on = |day: u32| period.date_for_day(day).unwrap_or(period.start());

    let residents: Vec<Resident> = RESIDENTS
        .iter()
        .map(|name| Resident {
            id: Uuid::now_v7(),
            tenant_id: GUEST_TENANT_ID,
            name: (*name).into(),
            join_date: period.start(),
        })
        .collect();

    let mut meals = Vec::new();
    for (resident, counts) in residents.iter().zip(MEALS) {
        for (day, meal_count) in (1..).zip(counts) {
            if meal_count == 0 {
                continue;
            }
            meals.push(MealRecord {
                id: Uuid::now_v7(),
                tenant_id: GUEST_TENANT_ID,
                resident_id: resident.id,
                date: on(day),
                meal_count,
            });
        }
    }

    let mut market: Vec<MarketRecord> = MARKET
        .iter()
        .filter_map(|&(index, day, amount, description)| {
            residents.get(index).map(|resident| MarketRecord {
                id: Uuid::now_v7(),
                tenant_id: GUEST_TENANT_ID,
                resident_id: resident.id,
                date: on(day),
                amount,
                description: description.into(),
            })
        })
        .collect();
    market.reverse();

    let bills = vec![BillRecord {
        id: Uuid::now_v7(),
        tenant_id: GUEST_TENANT_ID,
        name: "Cook's salary".into(),
        amount: 1500.0,
        date: period.start(),
    }];

    Snapshot {
        residents,
        meals,
        market,
        bills,
    }
}
