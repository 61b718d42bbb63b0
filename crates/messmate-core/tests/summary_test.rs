//! Dashboard and meal matrix views.

use chrono::NaiveDate;
use messmate_core::models::GUEST_TENANT_ID;
use messmate_core::models::market::MarketRecord;
use messmate_core::models::meal::MealRecord;
use messmate_core::models::resident::Resident;
use messmate_core::period::Period;
use messmate_core::snapshot::Snapshot;
use messmate_core::summary::{dashboard, meal_matrix};
use uuid::Uuid;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
}

fn setup() -> (Snapshot, Uuid, Uuid) {
    let a = Resident {
        id: Uuid::new_v4(),
        tenant_id: GUEST_TENANT_ID,
        name: "Alice".into(),
        join_date: date(1),
    };
    let b = Resident {
        id: Uuid::new_v4(),
        tenant_id: GUEST_TENANT_ID,
        name: "Bilal".into(),
        join_date: date(1),
    };
    let meals = [(a.id, 1, 2), (a.id, 29, 3), (a.id, 10, 1)]
        .into_iter()
        .map(|(resident_id, day, meal_count)| MealRecord {
            id: Uuid::new_v4(),
            tenant_id: GUEST_TENANT_ID,
            resident_id,
            date: date(day),
            meal_count,
        })
        .collect();
    let market = vec![MarketRecord {
        id: Uuid::new_v4(),
        tenant_id: GUEST_TENANT_ID,
        resident_id: b.id,
        date: date(5),
        amount: 420.0,
        description: "Rice".into(),
    }];
    let (a_id, b_id) = (a.id, b.id);
    (
        Snapshot {
            residents: vec![a, b],
            meals,
            market,
            bills: Vec::new(),
        },
        a_id,
        b_id,
    )
}

#[test]
fn dashboard_omits_residents_without_activity() {
    let (snapshot, a_id, b_id) = setup();
    let view = dashboard(&snapshot, &Period::parse("2024-02").unwrap());

    assert_eq!(view.resident_count, 2);
    assert_eq!(view.total_meals, 6);
    assert_eq!(view.total_market, 420.0);

    assert_eq!(view.meals_by_resident.len(), 1);
    assert_eq!(view.meals_by_resident[0].resident_id, a_id);
    assert_eq!(view.meals_by_resident[0].value, 6);

    assert_eq!(view.market_by_resident.len(), 1);
    assert_eq!(view.market_by_resident[0].resident_id, b_id);
}

#[test]
fn matrix_places_counts_by_day() {
    let (snapshot, a_id, b_id) = setup();
    let matrix = meal_matrix(&snapshot, &Period::parse("2024-02").unwrap());

    assert_eq!(matrix.rows.len(), 2);
    assert_eq!(matrix.rows[0].days.len(), 29);
    assert_eq!(matrix.cell(a_id, 1), 2);
    assert_eq!(matrix.cell(a_id, 29), 3);
    assert_eq!(matrix.cell(a_id, 2), 0);
    assert_eq!(matrix.cell(a_id, 0), 0);
    assert_eq!(matrix.cell(b_id, 10), 0);
    assert_eq!(matrix.rows[0].total, 6);
    assert_eq!(matrix.grand_total, 6);
}

#[test]
fn matrix_for_other_month_is_empty() {
    let (snapshot, a_id, _) = setup();
    let matrix = meal_matrix(&snapshot, &Period::parse("2024-03").unwrap());
    assert_eq!(matrix.grand_total, 0);
    assert_eq!(matrix.cell(a_id, 1), 0);
    assert_eq!(matrix.rows[0].days.len(), 31);
}
