//! Tenant-scoped ledger backed by a persistence client.
//!
//! Every operation first resolves the signed-in actor's group. Without
//! one the operation is refused with [`MessmateError::TenantContext`]
//! and nothing is read or written. After a successful write the four
//! collections are listed again and returned as the new snapshot.

use messmate_core::error::{MessmateError, MessmateResult};
use messmate_core::models::{ActorId, GUEST_TENANT_ID};
use messmate_core::models::record::{NewRecord, Record, RecordKind, RecordUpdate};
use messmate_core::repository::{
    ActorProvider, Filter, LedgerMode, LedgerStore, PersistenceClient, TenantResolver,
};
use messmate_core::snapshot::Snapshot;
use tracing::{debug, warn};
use uuid::Uuid;

/// [`ActorProvider`] for a session whose sign-in state is fixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedInActor(pub Option<ActorId>);

impl ActorProvider for SignedInActor {
    fn current_actor(&self) -> Option<ActorId> {
        self.0
    }
}

/// Remote [`LedgerStore`].
///
/// Generic over its collaborators so that it has no dependency on a
/// particular database.
pub struct RemoteLedger<P, A, T> {
    client: P,
    actors: A,
    tenants: T,
}

impl<P, A, T> RemoteLedger<P, A, T>
where
    P: PersistenceClient,
    A: ActorProvider,
    T: TenantResolver,
{
    pub fn new(client: P, actors: A, tenants: T) -> Self {
        Self {
            client,
            actors,
            tenants,
        }
    }

    pub fn client(&self) -> &P {
        &self.client
    }

    /// The group of the signed-in actor.
    async fn tenant(&self) -> MessmateResult<Uuid> {
        let Some(actor) = self.actors.current_actor() else {
            warn!("No signed-in actor; ledger operation abandoned");
            return Err(MessmateError::TenantContext);
        };
        match self.tenants.resolve(actor).await? {
            Some(tenant_id) if tenant_id != GUEST_TENANT_ID => Ok(tenant_id),
            _ => {
                warn!(actor_id = %actor, "No group found for actor; ledger operation abandoned");
                Err(MessmateError::TenantContext)
            }
        }
    }

    /// Read-after-write refresh: list every collection for the tenant.
    async fn fetch(&self, tenant_id: Uuid) -> MessmateResult<Snapshot> {
        let mut records = Vec::new();
        for kind in RecordKind::ALL {
            records.extend(self.client.select(kind, Filter::tenant(tenant_id)).await?);
        }
        let snapshot = Snapshot::from_records(records);
        debug!(
            tenant_id = %tenant_id,
            residents = snapshot.residents.len(),
            meals = snapshot.meals.len(),
            market = snapshot.market.len(),
            bills = snapshot.bills.len(),
            "Ledger snapshot fetched"
        );
        Ok(snapshot)
    }

    /// Remove a resident's meal and market rows before the resident.
    async fn delete_dependents(&self, tenant_id: Uuid, resident_id: Uuid) -> MessmateResult<()> {
        for kind in [RecordKind::Meals, RecordKind::Market] {
            let dependents = self
                .client
                .select(kind, Filter::tenant(tenant_id).resident(resident_id))
                .await?;
            for record in dependents {
                self.client.delete(tenant_id, kind, record.id()).await?;
            }
        }
        Ok(())
    }
}

impl<P, A, T> LedgerStore for RemoteLedger<P, A, T>
where
    P: PersistenceClient,
    A: ActorProvider,
    T: TenantResolver,
{
    fn mode(&self) -> LedgerMode {
        LedgerMode::Remote
    }

    async fn list(&self, kind: RecordKind) -> MessmateResult<Vec<Record>> {
        let tenant_id = self.tenant().await?;
        self.client.select(kind, Filter::tenant(tenant_id)).await
    }

    async fn snapshot(&self) -> MessmateResult<Snapshot> {
        let tenant_id = self.tenant().await?;
        self.fetch(tenant_id).await
    }

    async fn create(&self, input: NewRecord) -> MessmateResult<Snapshot> {
        let tenant_id = self.tenant().await?;
        let kind = input.kind();
        let record = self.client.insert(tenant_id, input).await?;
        debug!(tenant_id = %tenant_id, %kind, record_id = %record.id(), "Record created");
        self.fetch(tenant_id).await
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
        let tenant_id = self.tenant().await?;
        self.client.update(tenant_id, id, input).await?;
        debug!(tenant_id = %tenant_id, %kind, record_id = %id, "Record updated");
        self.fetch(tenant_id).await
    }

    async fn delete(&self, kind: RecordKind, id: Uuid) -> MessmateResult<Snapshot> {
        let tenant_id = self.tenant().await?;
        if kind == RecordKind::Residents {
            self.delete_dependents(tenant_id, id).await?;
        }
        self.client.delete(tenant_id, kind, id).await?;
        debug!(tenant_id = %tenant_id, %kind, record_id = %id, "Record deleted");
        self.fetch(tenant_id).await
    }
}
