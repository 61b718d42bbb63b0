//! Typed record repository with change notification.
//!
//! The repository owns the session's current [`Snapshot`] and publishes
//! it through a `watch` channel. A snapshot is only ever replaced
//! wholesale by what the ledger store returns; a failed store call
//! leaves it untouched and notifies no one.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use messmate_core::error::{MessmateError, MessmateResult};
use messmate_core::models::bill::{CreateBillRecord, UpdateBillRecord};
use messmate_core::models::market::{CreateMarketRecord, UpdateMarketRecord};
use messmate_core::models::meal::{CreateMealRecord, UpdateMealCount};
use messmate_core::models::record::{NewRecord, RecordKind, RecordUpdate};
use messmate_core::models::resident::{CreateResident, UpdateResident};
use messmate_core::repository::{LedgerMode, LedgerStore};
use messmate_core::snapshot::Snapshot;
use tokio::sync::watch;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// What became of a repository mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The store accepted the change and the snapshot was replaced.
    Applied,
    /// Nothing to do; the store was not called.
    Unchanged,
    /// The store refused or failed. The error has been logged.
    Abandoned,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == MutationOutcome::Applied
    }
}

/// CRUD façade over the four record kinds for one session.
pub struct RecordRepository<S: LedgerStore> {
    store: S,
    state: watch::Sender<Arc<Snapshot>>,
}

impl<S: LedgerStore> RecordRepository<S> {
    /// Wrap a store with an empty snapshot. Call [`Self::refresh`] to
    /// load it.
    pub fn new(store: S) -> Self {
        let (state, _) = watch::channel(Arc::new(Snapshot::default()));
        Self { store, state }
    }

    /// Wrap a store and load its current contents.
    pub async fn open(store: S) -> Self {
        let repo = Self::new(store);
        repo.refresh().await;
        repo
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mode(&self) -> LedgerMode {
        self.store.mode()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.borrow().clone()
    }

    /// A receiver that is marked changed every time a new snapshot is
    /// published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.state.subscribe()
    }

    /// Replace the snapshot with a full fetch from the store.
    pub async fn refresh(&self) -> MutationOutcome {
        let result = self.store.snapshot().await;
        self.publish("refresh", result)
    }

    fn publish(&self, op: &'static str, result: MessmateResult<Snapshot>) -> MutationOutcome {
        match result {
            Ok(snapshot) => {
                self.state.send_replace(Arc::new(snapshot));
                debug!(op, mode = ?self.store.mode(), "Snapshot replaced");
                MutationOutcome::Applied
            }
            Err(MessmateError::TenantContext) => {
                warn!(op, "Tenant could not be resolved; operation abandoned");
                MutationOutcome::Abandoned
            }
            Err(err) => {
                error!(op, error = %err, "Ledger operation failed; operation abandoned");
                MutationOutcome::Abandoned
            }
        }
    }

    // -----------------------------------------------------------------------
    // Residents
    // -----------------------------------------------------------------------

    /// Add a resident who joins today.
    pub async fn add_resident(&self, name: &str) -> MutationOutcome {
        self.add_resident_on(name, Local::now().date_naive()).await
    }

    pub async fn add_resident_on(&self, name: &str, join_date: NaiveDate) -> MutationOutcome {
        let input = NewRecord::Resident(CreateResident {
            name: name.into(),
            join_date,
        });
        let result = self.store.create(input).await;
        self.publish("add_resident", result)
    }

    pub async fn update_resident(&self, id: Uuid, input: UpdateResident) -> MutationOutcome {
        let result = self
            .store
            .update(RecordKind::Residents, id, RecordUpdate::Resident(input))
            .await;
        self.publish("update_resident", result)
    }

    /// Remove a resident together with their meal and market records.
    pub async fn delete_resident(&self, id: Uuid) -> MutationOutcome {
        let result = self.store.delete(RecordKind::Residents, id).await;
        self.publish("delete_resident", result)
    }

    // -----------------------------------------------------------------------
    // Meals
    // -----------------------------------------------------------------------

    /// Set the meal count for one resident on one day.
    ///
    /// | current   | count | effect          |
    /// |-----------|-------|-----------------|
    /// | absent    | 0     | none            |
    /// | absent    | n > 0 | create          |
    /// | present m | m     | none            |
    /// | present m | n > 0 | update to n     |
    /// | present m | 0     | delete          |
    pub async fn set_meal_count(
        &self,
        resident_id: Uuid,
        date: NaiveDate,
        meal_count: u32,
    ) -> MutationOutcome {
        let existing = self
            .snapshot()
            .meal_for(resident_id, date)
            .map(|m| (m.id, m.meal_count));

        let result = match (existing, meal_count) {
            (None, 0) => return MutationOutcome::Unchanged,
            (Some((_, current)), n) if current == n => return MutationOutcome::Unchanged,
            (Some((id, _)), 0) => self.store.delete(RecordKind::Meals, id).await,
            (Some((id, _)), n) => {
                self.store
                    .update(
                        RecordKind::Meals,
                        id,
                        RecordUpdate::MealCount(UpdateMealCount { meal_count: n }),
                    )
                    .await
            }
            (None, n) => {
                self.store
                    .create(NewRecord::Meal(CreateMealRecord {
                        resident_id,
                        date,
                        meal_count: n,
                    }))
                    .await
            }
        };
        self.publish("set_meal_count", result)
    }

    // -----------------------------------------------------------------------
    // Market
    // -----------------------------------------------------------------------

    pub async fn add_market_record(&self, input: CreateMarketRecord) -> MutationOutcome {
        let result = self.store.create(NewRecord::Market(input)).await;
        self.publish("add_market_record", result)
    }

    pub async fn update_market_record(
        &self,
        id: Uuid,
        input: UpdateMarketRecord,
    ) -> MutationOutcome {
        let result = self
            .store
            .update(RecordKind::Market, id, RecordUpdate::Market(input))
            .await;
        self.publish("update_market_record", result)
    }

    pub async fn delete_market_record(&self, id: Uuid) -> MutationOutcome {
        let result = self.store.delete(RecordKind::Market, id).await;
        self.publish("delete_market_record", result)
    }

    // -----------------------------------------------------------------------
    // Bills
    // -----------------------------------------------------------------------

    pub async fn add_bill(&self, input: CreateBillRecord) -> MutationOutcome {
        let result = self.store.create(NewRecord::Bill(input)).await;
        self.publish("add_bill", result)
    }

    pub async fn update_bill(&self, id: Uuid, input: UpdateBillRecord) -> MutationOutcome {
        let result = self
            .store
            .update(RecordKind::Bills, id, RecordUpdate::Bill(input))
            .await;
        self.publish("update_bill", result)
    }

    pub async fn delete_bill(&self, id: Uuid) -> MutationOutcome {
        let result = self.store.delete(RecordKind::Bills, id).await;
        self.publish("delete_bill", result)
    }
}
