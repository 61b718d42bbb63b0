//! Process-local ledger used by guest sessions.
//!
//! State lives in memory under [`GUEST_TENANT_ID`] and is gone when the
//! session ends. Every operation completes without suspending.

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use messmate_core::error::{MessmateError, MessmateResult};
use messmate_core::models::GUEST_TENANT_ID;
use messmate_core::models::record::{NewRecord, Record, RecordKind, RecordUpdate};
use messmate_core::repository::{LedgerMode, LedgerStore};
use messmate_core::snapshot::Snapshot;
use tracing::debug;
use uuid::Uuid;

use crate::seed;

/// In-memory [`LedgerStore`].
///
/// Ids are time-ordered UUIDs, unique for the life of the process.
#[derive(Debug, Default)]
pub struct EphemeralLedger {
    state: Mutex<Snapshot>,
}

impl EphemeralLedger {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            state: Mutex::new(initial),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A ledger holding the sample household for the month of `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        Self::new(seed::sample_household(today))
    }

    fn lock(&self) -> MessmateResult<MutexGuard<'_, Snapshot>> {
        self.state
            .lock()
            .map_err(|_| MessmateError::Internal("guest ledger lock poisoned".into()))
    }
}

fn not_found(kind: RecordKind, id: Uuid) -> MessmateError {
    MessmateError::NotFound {
        entity: kind.table().into(),
        id: id.to_string(),
    }
}

fn sort_bills(state: &mut Snapshot) {
    state.bills.sort_by(|a, b| b.date.cmp(&a.date));
}

fn insert(state: &mut Snapshot, record: Record) -> MessmateResult<()> {
    match record {
        Record::Resident(r) => state.residents.push(r),
        Record::Meal(m) => {
            if m.meal_count == 0 {
                return Err(MessmateError::Validation {
                    message: "meal count must be positive".into(),
                });
            }
            if state.meal_for(m.resident_id, m.date).is_some() {
                return Err(MessmateError::AlreadyExists {
                    entity: RecordKind::Meals.table().into(),
                });
            }
            state.meals.push(m);
        }
        Record::Market(m) => state.market.insert(0, m),
        Record::Bill(b) => {
            state.bills.insert(0, b);
            sort_bills(state);
        }
    }
    Ok(())
}

fn update(state: &mut Snapshot, id: Uuid, input: &RecordUpdate) -> MessmateResult<()> {
    let kind = input.kind();
    match input {
        RecordUpdate::Resident(u) => {
            let r = state
                .residents
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| not_found(kind, id))?;
            r.name = u.name.clone();
            r.join_date = u.join_date;
        }
        RecordUpdate::MealCount(u) => {
            if u.meal_count == 0 {
                return Err(MessmateError::Validation {
                    message: "meal count must be positive".into(),
                });
            }
            let m = state
                .meals
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| not_found(kind, id))?;
            m.meal_count = u.meal_count;
        }
        RecordUpdate::Market(u) => {
            let m = state
                .market
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| not_found(kind, id))?;
            m.resident_id = u.resident_id;
            m.date = u.date;
            m.amount = u.amount;
            m.description = u.description.clone();
        }
        RecordUpdate::Bill(u) => {
            let b = state
                .bills
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| not_found(kind, id))?;
            b.name = u.name.clone();
            b.amount = u.amount;
            b.date = u.date;
            sort_bills(state);
        }
    }
    Ok(())
}

fn remove(state: &mut Snapshot, kind: RecordKind, id: Uuid) {
    match kind {
        RecordKind::Residents => {
            state.residents.retain(|r| r.id != id);
            state.meals.retain(|m| m.resident_id != id);
            state.market.retain(|m| m.resident_id != id);
        }
        RecordKind::Meals => state.meals.retain(|m| m.id != id),
        RecordKind::Market => state.market.retain(|m| m.id != id),
        RecordKind::Bills => state.bills.retain(|b| b.id != id),
    }
}

impl LedgerStore for EphemeralLedger {
    fn mode(&self) -> LedgerMode {
        LedgerMode::Guest
    }

    async fn list(&self, kind: RecordKind) -> MessmateResult<Vec<Record>> {
        Ok(self.lock()?.records(kind))
    }

    async fn snapshot(&self) -> MessmateResult<Snapshot> {
        Ok(self.lock()?.clone())
    }

    async fn create(&self, input: NewRecord) -> MessmateResult<Snapshot> {
        let kind = input.kind();
        let id = Uuid::now_v7();
        let mut state = self.lock()?;
        insert(&mut state, input.into_record(id, GUEST_TENANT_ID))?;
        debug!(%kind, record_id = %id, "Guest record created");
        Ok(state.clone())
    }

    async fn update(
        &self,
        kind: RecordKind,
        id: Uuid,
        input: RecordUpdate,
    ) -> MessmateResult<Snapshot> {
        if input.kind() != kind {
            return Err(MessmateError::Validation {
                message: format!("cannot apply a {} update to {kind}", input.kind()),
            });
        }
        let mut state = self.lock()?;
        update(&mut state, id, &input)?;
        debug!(%kind, record_id = %id, "Guest record updated");
        Ok(state.clone())
    }

    async fn delete(&self, kind: RecordKind, id: Uuid) -> MessmateResult<Snapshot> {
        let mut state = self.lock()?;
        remove(&mut state, kind, id);
        debug!(%kind, record_id = %id, "Guest record deleted");
        Ok(state.clone())
    }
}
