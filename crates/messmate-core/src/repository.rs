//! Boundary traits for ledger storage.
//!
//! All operations are async. Ledger operations are scoped to a single
//! tenant; group management is global.
//! [`LedgerStore`] is what a session works against; the Remote backend
//! is assembled from a [`PersistenceClient`], an [`ActorProvider`] and a
//! [`TenantResolver`].

use uuid::Uuid;

use crate::error::MessmateResult;
use crate::models::ActorId;
use crate::models::group::{CreateGroup, Group};
use crate::models::record::{NewRecord, Record, RecordKind, RecordUpdate};
use crate::snapshot::Snapshot;

/// Which backend a session runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerMode {
    /// Process-local, non-persistent.
    #[default]
    Guest,
    /// Tenant-scoped persistent backend.
    Remote,
}

// ---------------------------------------------------------------------------
// Ledger store (session-facing)
// ---------------------------------------------------------------------------

/// Tenant-scoped CRUD over the four record kinds.
///
/// Mutations return the complete canonical state after the write so the
/// caller can replace its copy wholesale.
pub trait LedgerStore: Send + Sync {
    fn mode(&self) -> LedgerMode;

    fn list(&self, kind: RecordKind) -> impl Future<Output = MessmateResult<Vec<Record>>> + Send;

    /// All four collections for the active tenant.
    fn snapshot(&self) -> impl Future<Output = MessmateResult<Snapshot>> + Send;

    fn create(&self, input: NewRecord) -> impl Future<Output = MessmateResult<Snapshot>> + Send;

    fn update(
        &self,
        kind: RecordKind,
        id: Uuid,
        input: RecordUpdate,
    ) -> impl Future<Output = MessmateResult<Snapshot>> + Send;

    /// Deleting a resident also removes their meal and market records.
    fn delete(
        &self,
        kind: RecordKind,
        id: Uuid,
    ) -> impl Future<Output = MessmateResult<Snapshot>> + Send;
}

// ---------------------------------------------------------------------------
// Collaborators of the Remote backend
// ---------------------------------------------------------------------------

/// Row filter for [`PersistenceClient::select`]. The tenant is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub tenant_id: Uuid,
    pub resident_id: Option<Uuid>,
}

impl Filter {
    pub fn tenant(tenant_id: Uuid) -> Self {
        Self {
            tenant_id,
            resident_id: None,
        }
    }

    pub fn resident(mut self, resident_id: Uuid) -> Self {
        self.resident_id = Some(resident_id);
        self
    }
}

/// Generic access to the persisted collections.
pub trait PersistenceClient: Send + Sync {
    fn select(
        &self,
        kind: RecordKind,
        filter: Filter,
    ) -> impl Future<Output = MessmateResult<Vec<Record>>> + Send;

    /// Store a new record under `tenant_id` and return it with its id.
    fn insert(
        &self,
        tenant_id: Uuid,
        input: NewRecord,
    ) -> impl Future<Output = MessmateResult<Record>> + Send;

    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: RecordUpdate,
    ) -> impl Future<Output = MessmateResult<()>> + Send;

    fn delete(
        &self,
        tenant_id: Uuid,
        kind: RecordKind,
        id: Uuid,
    ) -> impl Future<Output = MessmateResult<()>> + Send;
}

/// Yields the signed-in actor, if any.
pub trait ActorProvider: Send + Sync {
    fn current_actor(&self) -> Option<ActorId>;
}

/// One-to-one lookup from actor to the group they belong to.
pub trait TenantResolver: Send + Sync {
    fn resolve(
        &self,
        actor: ActorId,
    ) -> impl Future<Output = MessmateResult<Option<Uuid>>> + Send;
}

// ---------------------------------------------------------------------------
// Groups (global scope)
// ---------------------------------------------------------------------------

pub trait GroupRepository: Send + Sync {
    fn create(&self, input: CreateGroup) -> impl Future<Output = MessmateResult<Group>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MessmateResult<Group>> + Send;
    /// Make `actor` a member of `group_id`. An actor belongs to at most
    /// one group.
    fn add_member(
        &self,
        group_id: Uuid,
        actor: ActorId,
    ) -> impl Future<Output = MessmateResult<()>> + Send;
    fn remove_member(&self, actor: ActorId) -> impl Future<Output = MessmateResult<()>> + Send;
}
