//! Kind-tagged wrappers used by the generic ledger contract.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bill::{BillRecord, CreateBillRecord, UpdateBillRecord};
use super::market::{CreateMarketRecord, MarketRecord, UpdateMarketRecord};
use super::meal::{CreateMealRecord, MealRecord, UpdateMealCount};
use super::resident::{CreateResident, Resident, UpdateResident};

/// The four tenant-scoped collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Residents,
    Meals,
    Market,
    Bills,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Residents,
        RecordKind::Meals,
        RecordKind::Market,
        RecordKind::Bills,
    ];

    /// Persisted collection name.
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Residents => "residents",
            RecordKind::Meals => "meals",
            RecordKind::Market => "market",
            RecordKind::Bills => "bills",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Resident(Resident),
    Meal(MealRecord),
    Market(MarketRecord),
    Bill(BillRecord),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Resident(_) => RecordKind::Residents,
            Record::Meal(_) => RecordKind::Meals,
            Record::Market(_) => RecordKind::Market,
            Record::Bill(_) => RecordKind::Bills,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Record::Resident(r) => r.id,
            Record::Meal(m) => m.id,
            Record::Market(m) => m.id,
            Record::Bill(b) => b.id,
        }
    }

    pub fn tenant_id(&self) -> Uuid {
        match self {
            Record::Resident(r) => r.tenant_id,
            Record::Meal(m) => m.tenant_id,
            Record::Market(m) => m.tenant_id,
            Record::Bill(b) => b.tenant_id,
        }
    }
}

/// Fields for a record that does not exist yet. The store assigns the
/// id and the tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NewRecord {
    Resident(CreateResident),
    Meal(CreateMealRecord),
    Market(CreateMarketRecord),
    Bill(CreateBillRecord),
}

impl NewRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            NewRecord::Resident(_) => RecordKind::Residents,
            NewRecord::Meal(_) => RecordKind::Meals,
            NewRecord::Market(_) => RecordKind::Market,
            NewRecord::Bill(_) => RecordKind::Bills,
        }
    }

    /// Materialise the record under the given id and tenant.
    pub fn into_record(self, id: Uuid, tenant_id: Uuid) -> Record {
        match self {
            NewRecord::Resident(r) => Record::Resident(Resident {
                id,
                tenant_id,
                name: r.name,
                join_date: r.join_date,
            }),
            NewRecord::Meal(m) => Record::Meal(MealRecord {
                id,
                tenant_id,
                resident_id: m.resident_id,
                date: m.date,
                meal_count: m.meal_count,
            }),
            NewRecord::Market(m) => Record::Market(MarketRecord {
                id,
                tenant_id,
                resident_id: m.resident_id,
                date: m.date,
                amount: m.amount,
                description: m.description,
            }),
            NewRecord::Bill(b) => Record::Bill(BillRecord {
                id,
                tenant_id,
                name: b.name,
                amount: b.amount,
                date: b.date,
            }),
        }
    }
}

/// Replacement fields for an existing record. Meals only accept a count
/// patch; the other kinds are replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordUpdate {
    Resident(UpdateResident),
    MealCount(UpdateMealCount),
    Market(UpdateMarketRecord),
    Bill(UpdateBillRecord),
}

impl RecordUpdate {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordUpdate::Resident(_) => RecordKind::Residents,
            RecordUpdate::MealCount(_) => RecordKind::Meals,
            RecordUpdate::Market(_) => RecordKind::Market,
            RecordUpdate::Bill(_) => RecordKind::Bills,
        }
    }
}
