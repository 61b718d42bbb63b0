//! SurrealDB implementation of [`PersistenceClient`].
//!
//! One table per record kind. Every statement carries a
//! `tenant_id = $tenant_id` condition.

use chrono::NaiveDate;
use messmate_core::error::MessmateResult;
use messmate_core::models::bill::BillRecord;
use messmate_core::models::market::MarketRecord;
use messmate_core::models::meal::MealRecord;
use messmate_core::models::record::{NewRecord, Record, RecordKind, RecordUpdate};
use messmate_core::models::resident::Resident;
use messmate_core::repository::{Filter, PersistenceClient};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn parse_date(value: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| DbError::Decode(format!("invalid date {value:?}: {e}")))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// -----------------------------------------------------------------------
// Rows
// -----------------------------------------------------------------------

/// DB-side row structs include the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ResidentRow {
    record_id: String,
    tenant_id: String,
    name: String,
    join_date: String,
}

impl ResidentRow {
    fn try_into_record(self) -> Result<Record, DbError> {
        Ok(Record::Resident(Resident {
            id: parse_uuid(&self.record_id, "resident")?,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            name: self.name,
            join_date: parse_date(&self.join_date)?,
        }))
    }
}

#[derive(Debug, SurrealValue)]
struct MealRow {
    record_id: String,
    tenant_id: String,
    resident_id: String,
    date: String,
    meal_count: i64,
}

impl MealRow {
    fn try_into_record(self) -> Result<Record, DbError> {
        let meal_count = u32::try_from(self.meal_count)
            .map_err(|_| DbError::Decode(format!("invalid meal count {}", self.meal_count)))?;
        Ok(Record::Meal(MealRecord {
            id: parse_uuid(&self.record_id, "meal")?,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            resident_id: parse_uuid(&self.resident_id, "resident")?,
            date: parse_date(&self.date)?,
            meal_count,
        }))
    }
}

#[derive(Debug, SurrealValue)]
struct MarketRow {
    record_id: String,
    tenant_id: String,
    resident_id: String,
    date: String,
    amount: f64,
    description: String,
}

impl MarketRow {
    fn try_into_record(self) -> Result<Record, DbError> {
        Ok(Record::Market(MarketRecord {
            id: parse_uuid(&self.record_id, "market")?,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            resident_id: parse_uuid(&self.resident_id, "resident")?,
            date: parse_date(&self.date)?,
            amount: self.amount,
            description: self.description,
        }))
    }
}

#[derive(Debug, SurrealValue)]
struct BillRow {
    record_id: String,
    tenant_id: String,
    name: String,
    amount: f64,
    date: String,
}

impl BillRow {
    fn try_into_record(self) -> Result<Record, DbError> {
        Ok(Record::Bill(BillRecord {
            id: parse_uuid(&self.record_id, "bill")?,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            name: self.name,
            amount: self.amount,
            date: parse_date(&self.date)?,
        }))
    }
}

/// Row returned by CREATE/UPDATE statements; only used to tell whether a
/// record was touched.
#[derive(Debug, SurrealValue)]
struct TouchedRow {
    tenant_id: String,
}

fn order_clause(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Residents | RecordKind::Meals => "ORDER BY created_at ASC",
        RecordKind::Market => "ORDER BY created_at DESC",
        RecordKind::Bills => "ORDER BY date DESC, created_at DESC",
    }
}

fn collect<R>(
    rows: Vec<R>,
    convert: impl Fn(R) -> Result<Record, DbError>,
) -> Result<Vec<Record>, DbError> {
    rows.into_iter().map(convert).collect()
}

// -----------------------------------------------------------------------
// Client
// -----------------------------------------------------------------------

/// SurrealDB implementation of the ledger persistence client.
#[derive(Clone)]
pub struct SurrealPersistenceClient<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPersistenceClient<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PersistenceClient for SurrealPersistenceClient<C> {
    async fn select(&self, kind: RecordKind, filter: Filter) -> MessmateResult<Vec<Record>> {
        let table = kind.table();
        let resident_clause = match (kind, filter.resident_id) {
            (RecordKind::Meals | RecordKind::Market, Some(_)) => " AND resident_id = $resident_id",
            _ => "",
        };
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM {table} \
             WHERE tenant_id = $tenant_id{resident_clause} {}",
            order_clause(kind)
        );

        let mut builder = self
            .db
            .query(query)
            .bind(("tenant_id", filter.tenant_id.to_string()));
        if let Some(resident_id) = filter.resident_id {
            builder = builder.bind(("resident_id", resident_id.to_string()));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let records = match kind {
            RecordKind::Residents => {
                let rows: Vec<ResidentRow> = result.take(0).map_err(DbError::from)?;
                collect(rows, ResidentRow::try_into_record)?
            }
            RecordKind::Meals => {
                let rows: Vec<MealRow> = result.take(0).map_err(DbError::from)?;
                collect(rows, MealRow::try_into_record)?
            }
            RecordKind::Market => {
                let rows: Vec<MarketRow> = result.take(0).map_err(DbError::from)?;
                collect(rows, MarketRow::try_into_record)?
            }
            RecordKind::Bills => {
                let rows: Vec<BillRow> = result.take(0).map_err(DbError::from)?;
                collect(rows, BillRow::try_into_record)?
            }
        };
        Ok(records)
    }

    async fn insert(&self, tenant_id: Uuid, input: NewRecord) -> MessmateResult<Record> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let kind = input.kind();

        let builder = match &input {
            NewRecord::Resident(r) => self
                .db
                .query(
                    "CREATE type::record('residents', $id) SET \
                     tenant_id = $tenant_id, name = $name, join_date = $join_date",
                )
                .bind(("name", r.name.clone()))
                .bind(("join_date", format_date(r.join_date))),
            NewRecord::Meal(m) => self
                .db
                .query(
                    "CREATE type::record('meals', $id) SET \
                     tenant_id = $tenant_id, resident_id = $resident_id, \
                     date = $date, meal_count = $meal_count",
                )
                .bind(("resident_id", m.resident_id.to_string()))
                .bind(("date", format_date(m.date)))
                .bind(("meal_count", i64::from(m.meal_count))),
            NewRecord::Market(m) => self
                .db
                .query(
                    "CREATE type::record('market', $id) SET \
                     tenant_id = $tenant_id, resident_id = $resident_id, \
                     date = $date, amount = $amount, description = $description",
                )
                .bind(("resident_id", m.resident_id.to_string()))
                .bind(("date", format_date(m.date)))
                .bind(("amount", m.amount))
                .bind(("description", m.description.clone())),
            NewRecord::Bill(b) => self
                .db
                .query(
                    "CREATE type::record('bills', $id) SET \
                     tenant_id = $tenant_id, name = $name, amount = $amount, date = $date",
                )
                .bind(("name", b.name.clone()))
                .bind(("amount", b.amount))
                .bind(("date", format_date(b.date))),
        };

        let result = builder
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<TouchedRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: kind.table().into(),
                id: id_str,
            }
            .into());
        }

        Ok(input.into_record(id, tenant_id))
    }

    async fn update(&self, tenant_id: Uuid, id: Uuid, input: RecordUpdate) -> MessmateResult<()> {
        let id_str = id.to_string();
        let kind = input.kind();

        let builder = match input {
            RecordUpdate::Resident(u) => self
                .db
                .query(
                    "UPDATE type::record('residents', $id) SET \
                     name = $name, join_date = $join_date, updated_at = time::now() \
                     WHERE tenant_id = $tenant_id",
                )
                .bind(("name", u.name))
                .bind(("join_date", format_date(u.join_date))),
            RecordUpdate::MealCount(u) => self
                .db
                .query(
                    "UPDATE type::record('meals', $id) SET \
                     meal_count = $meal_count, updated_at = time::now() \
                     WHERE tenant_id = $tenant_id",
                )
                .bind(("meal_count", i64::from(u.meal_count))),
            RecordUpdate::Market(u) => self
                .db
                .query(
                    "UPDATE type::record('market', $id) SET \
                     resident_id = $resident_id, date = $date, amount = $amount, \
                     description = $description, updated_at = time::now() \
                     WHERE tenant_id = $tenant_id",
                )
                .bind(("resident_id", u.resident_id.to_string()))
                .bind(("date", format_date(u.date)))
                .bind(("amount", u.amount))
                .bind(("description", u.description)),
            RecordUpdate::Bill(u) => self
                .db
                .query(
                    "UPDATE type::record('bills', $id) SET \
                     name = $name, amount = $amount, date = $date, \
                     updated_at = time::now() \
                     WHERE tenant_id = $tenant_id",
                )
                .bind(("name", u.name))
                .bind(("amount", u.amount))
                .bind(("date", format_date(u.date))),
        };

        let result = builder
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<TouchedRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: kind.table().into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn delete(&self, tenant_id: Uuid, kind: RecordKind, id: Uuid) -> MessmateResult<()> {
        let query = format!(
            "DELETE type::record('{}', $id) WHERE tenant_id = $tenant_id",
            kind.table()
        );

        self.db
            .query(query)
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}
