//! Recording fakes for the remote ledger's collaborators.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use messmate_core::error::{MessmateError, MessmateResult};
use messmate_core::models::ActorId;
use messmate_core::models::record::{NewRecord, Record, RecordKind, RecordUpdate};
use messmate_core::repository::{Filter, PersistenceClient, TenantResolver};
use uuid::Uuid;

/// One call made against the fake client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Select(RecordKind, Filter),
    Insert(Uuid, RecordKind),
    Update(Uuid, Uuid),
    Delete(Uuid, RecordKind, Uuid),
}

#[derive(Default)]
struct Inner {
    rows: Mutex<Vec<Record>>,
    calls: Mutex<Vec<Call>>,
    fail_writes: AtomicBool,
}

/// In-memory [`PersistenceClient`] that records every call.
#[derive(Clone, Default)]
pub struct RecordingClient {
    inner: Arc<Inner>,
}

impl RecordingClient {
    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.inner.calls.lock().unwrap().clear();
    }

    pub fn rows(&self) -> Vec<Record> {
        self.inner.rows.lock().unwrap().clone()
    }

    /// Insert a row directly, bypassing the call log.
    pub fn seed(&self, tenant_id: Uuid, input: NewRecord) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .rows
            .lock()
            .unwrap()
            .push(input.into_record(id, tenant_id));
        id
    }

    /// Make every subsequent insert/update/delete fail.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn log(&self, call: Call) {
        self.inner.calls.lock().unwrap().push(call);
    }

    fn check_writable(&self) -> MessmateResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(MessmateError::Database("connection reset".into()));
        }
        Ok(())
    }
}

fn resident_of(record: &Record) -> Option<Uuid> {
    match record {
        Record::Meal(m) => Some(m.resident_id),
        Record::Market(m) => Some(m.resident_id),
        _ => None,
    }
}

fn apply(record: &mut Record, input: &RecordUpdate) {
    match (input, record) {
        (RecordUpdate::Resident(u), Record::Resident(r)) => {
            r.name = u.name.clone();
            r.join_date = u.join_date;
        }
        (RecordUpdate::MealCount(u), Record::Meal(m)) => m.meal_count = u.meal_count,
        (RecordUpdate::Market(u), Record::Market(m)) => {
            m.resident_id = u.resident_id;
            m.date = u.date;
            m.amount = u.amount;
            m.description = u.description.clone();
        }
        (RecordUpdate::Bill(u), Record::Bill(b)) => {
            b.name = u.name.clone();
            b.amount = u.amount;
            b.date = u.date;
        }
        _ => {}
    }
}

impl PersistenceClient for RecordingClient {
    async fn select(&self, kind: RecordKind, filter: Filter) -> MessmateResult<Vec<Record>> {
        self.log(Call::Select(kind, filter));
        Ok(self
            .rows()
            .into_iter()
            .filter(|r| r.kind() == kind && r.tenant_id() == filter.tenant_id)
            .filter(|r| filter.resident_id.is_none() || resident_of(r) == filter.resident_id)
            .collect())
    }

    async fn insert(&self, tenant_id: Uuid, input: NewRecord) -> MessmateResult<Record> {
        self.log(Call::Insert(tenant_id, input.kind()));
        self.check_writable()?;
        let record = input.into_record(Uuid::new_v4(), tenant_id);
        self.inner.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, tenant_id: Uuid, id: Uuid, input: RecordUpdate) -> MessmateResult<()> {
        self.log(Call::Update(tenant_id, id));
        self.check_writable()?;
        let mut rows = self.inner.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id && r.tenant_id() == tenant_id)
            .ok_or_else(|| MessmateError::NotFound {
                entity: input.kind().to_string(),
                id: id.to_string(),
            })?;
        apply(row, &input);
        Ok(())
    }

    async fn delete(&self, tenant_id: Uuid, kind: RecordKind, id: Uuid) -> MessmateResult<()> {
        self.log(Call::Delete(tenant_id, kind, id));
        self.check_writable()?;
        self.inner
            .rows
            .lock()
            .unwrap()
            .retain(|r| !(r.id() == id && r.tenant_id() == tenant_id));
        Ok(())
    }
}

/// Actor → group lookup backed by a map.
#[derive(Clone, Default)]
pub struct MapResolver {
    groups: HashMap<ActorId, Uuid>,
}

impl MapResolver {
    pub fn with(actor: ActorId, tenant_id: Uuid) -> Self {
        let mut groups = HashMap::new();
        groups.insert(actor, tenant_id);
        Self { groups }
    }
}

impl TenantResolver for MapResolver {
    async fn resolve(&self, actor: ActorId) -> MessmateResult<Option<Uuid>> {
        Ok(self.groups.get(&actor).copied())
    }
}
