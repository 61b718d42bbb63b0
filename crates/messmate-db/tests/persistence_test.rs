//! Integration tests for the SurrealDB persistence client.

use chrono::NaiveDate;
use messmate_core::error::MessmateError;
use messmate_core::models::bill::CreateBillRecord;
use messmate_core::models::market::{CreateMarketRecord, UpdateMarketRecord};
use messmate_core::models::meal::{CreateMealRecord, UpdateMealCount};
use messmate_core::models::record::{NewRecord, Record, RecordKind, RecordUpdate};
use messmate_core::models::resident::{CreateResident, UpdateResident};
use messmate_core::repository::{Filter, PersistenceClient};
use messmate_db::repository::SurrealPersistenceClient;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

async fn setup() -> SurrealPersistenceClient<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    messmate_db::run_migrations(&db).await.unwrap();
    SurrealPersistenceClient::new(db)
}

async fn insert_resident(client: &SurrealPersistenceClient<Db>, tenant: Uuid, name: &str) -> Uuid {
    client
        .insert(
            tenant,
            NewRecord::Resident(CreateResident {
                name: name.into(),
                join_date: date(1),
            }),
        )
        .await
        .unwrap()
        .id()
}

#[tokio::test]
async fn insert_then_select_resident() {
    let client = setup().await;
    let tenant = Uuid::new_v4();

    let created = client
        .insert(
            tenant,
            NewRecord::Resident(CreateResident {
                name: "Rahim".into(),
                join_date: date(3),
            }),
        )
        .await
        .unwrap();

    let rows = client
        .select(RecordKind::Residents, Filter::tenant(tenant))
        .await
        .unwrap();
    assert_eq!(rows, vec![created.clone()]);

    let Record::Resident(resident) = created else {
        panic!("expected a resident");
    };
    assert_eq!(resident.name, "Rahim");
    assert_eq!(resident.join_date, date(3));
    assert_eq!(resident.tenant_id, tenant);
}

#[tokio::test]
async fn select_is_tenant_scoped() {
    let client = setup().await;
    let ours = Uuid::new_v4();
    let theirs = Uuid::new_v4();

    insert_resident(&client, ours, "Rahim").await;
    insert_resident(&client, theirs, "Someone else").await;

    let rows = client
        .select(RecordKind::Residents, Filter::tenant(ours))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|r| r.tenant_id() == ours));
}

#[tokio::test]
async fn select_filters_by_resident() {
    let client = setup().await;
    let tenant = Uuid::new_v4();
    let a = insert_resident(&client, tenant, "A").await;
    let b = insert_resident(&client, tenant, "B").await;

    for (resident_id, count) in [(a, 2), (b, 3)] {
        client
            .insert(
                tenant,
                NewRecord::Meal(CreateMealRecord {
                    resident_id,
                    date: date(1),
                    meal_count: count,
                }),
            )
            .await
            .unwrap();
    }

    let rows = client
        .select(RecordKind::Meals, Filter::tenant(tenant).resident(b))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    let Record::Meal(meal) = &rows[0] else {
        panic!("expected a meal");
    };
    assert_eq!(meal.resident_id, b);
    assert_eq!(meal.meal_count, 3);
}

#[tokio::test]
async fn duplicate_meal_cell_is_rejected() {
    let client = setup().await;
    let tenant = Uuid::new_v4();
    let resident_id = insert_resident(&client, tenant, "A").await;

    let cell = || {
        NewRecord::Meal(CreateMealRecord {
            resident_id,
            date: date(5),
            meal_count: 2,
        })
    };
    client.insert(tenant, cell()).await.unwrap();
    let err = client.insert(tenant, cell()).await.unwrap_err();
    assert!(matches!(err, MessmateError::Database(_)));
}

#[tokio::test]
async fn update_changes_fields() {
    let client = setup().await;
    let tenant = Uuid::new_v4();
    let resident_id = insert_resident(&client, tenant, "A").await;

    let meal_id = client
        .insert(
            tenant,
            NewRecord::Meal(CreateMealRecord {
                resident_id,
                date: date(2),
                meal_count: 1,
            }),
        )
        .await
        .unwrap()
        .id();
    client
        .update(
            tenant,
            meal_id,
            RecordUpdate::MealCount(UpdateMealCount { meal_count: 3 }),
        )
        .await
        .unwrap();

    client
        .update(
            tenant,
            resident_id,
            RecordUpdate::Resident(UpdateResident {
                name: "Renamed".into(),
                join_date: date(4),
            }),
        )
        .await
        .unwrap();

    let meals = client
        .select(RecordKind::Meals, Filter::tenant(tenant))
        .await
        .unwrap();
    let Record::Meal(meal) = &meals[0] else {
        panic!("expected a meal");
    };
    assert_eq!(meal.meal_count, 3);

    let residents = client
        .select(RecordKind::Residents, Filter::tenant(tenant))
        .await
        .unwrap();
    let Record::Resident(resident) = &residents[0] else {
        panic!("expected a resident");
    };
    assert_eq!(resident.name, "Renamed");
    assert_eq!(resident.join_date, date(4));
}

#[tokio::test]
async fn update_of_absent_record_is_not_found() {
    let client = setup().await;
    let tenant = Uuid::new_v4();

    let err = client
        .update(
            tenant,
            Uuid::new_v4(),
            RecordUpdate::Market(UpdateMarketRecord {
                resident_id: Uuid::new_v4(),
                date: date(1),
                amount: 10.0,
                description: "Rice".into(),
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MessmateError::NotFound { .. }));
}

#[tokio::test]
async fn update_across_tenants_is_not_found() {
    let client = setup().await;
    let owner = Uuid::new_v4();
    let resident_id = insert_resident(&client, owner, "A").await;

    let err = client
        .update(
            Uuid::new_v4(),
            resident_id,
            RecordUpdate::Resident(UpdateResident {
                name: "Hijacked".into(),
                join_date: date(1),
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MessmateError::NotFound { .. }));

    let rows = client
        .select(RecordKind::Residents, Filter::tenant(owner))
        .await
        .unwrap();
    let Record::Resident(resident) = &rows[0] else {
        panic!("expected a resident");
    };
    assert_eq!(resident.name, "A");
}

#[tokio::test]
async fn delete_is_tenant_scoped() {
    let client = setup().await;
    let owner = Uuid::new_v4();
    let resident_id = insert_resident(&client, owner, "A").await;

    client
        .delete(Uuid::new_v4(), RecordKind::Residents, resident_id)
        .await
        .unwrap();
    let rows = client
        .select(RecordKind::Residents, Filter::tenant(owner))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1, "another tenant must not delete the row");

    client
        .delete(owner, RecordKind::Residents, resident_id)
        .await
        .unwrap();
    let rows = client
        .select(RecordKind::Residents, Filter::tenant(owner))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn bills_are_listed_newest_date_first() {
    let client = setup().await;
    let tenant = Uuid::new_v4();

    for (name, day) in [("Gas", 3), ("Cook", 20), ("Internet", 11)] {
        client
            .insert(
                tenant,
                NewRecord::Bill(CreateBillRecord {
                    name: name.into(),
                    amount: 100.0,
                    date: date(day),
                }),
            )
            .await
            .unwrap();
    }

    let rows = client
        .select(RecordKind::Bills, Filter::tenant(tenant))
        .await
        .unwrap();
    let names: Vec<_> = rows
        .iter()
        .map(|r| match r {
            Record::Bill(b) => b.name.as_str(),
            _ => panic!("expected a bill"),
        })
        .collect();
    assert_eq!(names, ["Cook", "Internet", "Gas"]);
}

#[tokio::test]
async fn market_amount_round_trips() {
    let client = setup().await;
    let tenant = Uuid::new_v4();
    let resident_id = insert_resident(&client, tenant, "A").await;

    client
        .insert(
            tenant,
            NewRecord::Market(CreateMarketRecord {
                resident_id,
                date: date(9),
                amount: 1234.5,
                description: "Rice and lentils".into(),
            }),
        )
        .await
        .unwrap();

    let rows = client
        .select(RecordKind::Market, Filter::tenant(tenant))
        .await
        .unwrap();
    let Record::Market(entry) = &rows[0] else {
        panic!("expected a market entry");
    };
    assert_eq!(entry.amount, 1234.5);
    assert_eq!(entry.description, "Rice and lentils");
    assert_eq!(entry.date, date(9));
    assert_eq!(entry.resident_id, resident_id);
}
