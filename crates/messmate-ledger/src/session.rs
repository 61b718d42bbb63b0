//! Per-session backend selection.

use chrono::NaiveDate;
use messmate_core::error::{MessmateError, MessmateResult};
use messmate_core::models::record::{NewRecord, Record, RecordKind, RecordUpdate};
use messmate_core::repository::{
    ActorProvider, LedgerMode, LedgerStore, PersistenceClient, TenantResolver,
};
use messmate_core::snapshot::Snapshot;
use tracing::info;
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::ephemeral::EphemeralLedger;
use crate::remote::RemoteLedger;

/// The ledger a session runs against, chosen once when it starts.
pub enum SessionLedger<P, A, T> {
    Guest(EphemeralLedger),
    Remote(RemoteLedger<P, A, T>),
}

impl<P, A, T> SessionLedger<P, A, T>
where
    P: PersistenceClient,
    A: ActorProvider,
    T: TenantResolver,
{
    pub fn guest(config: &LedgerConfig, today: NaiveDate) -> Self {
        let ledger = if config.seed_sample_data {
            EphemeralLedger::seeded(today)
        } else {
            EphemeralLedger::empty()
        };
        info!(seeded = config.seed_sample_data, "Guest ledger selected");
        Self::Guest(ledger)
    }

    pub fn remote(ledger: RemoteLedger<P, A, T>) -> Self {
        info!("Remote ledger selected");
        Self::Remote(ledger)
    }

    /// Pick the backend named by `config.mode`. `remote` is only
    /// consulted in remote mode and must then be present.
    pub fn select(
        config: &LedgerConfig,
        today: NaiveDate,
        remote: Option<RemoteLedger<P, A, T>>,
    ) -> MessmateResult<Self> {
        match (config.mode, remote) {
            (LedgerMode::Guest, _) => Ok(Self::guest(config, today)),
            (LedgerMode::Remote, Some(ledger)) => Ok(Self::remote(ledger)),
            (LedgerMode::Remote, None) => Err(MessmateError::Validation {
                message: "remote mode requires a persistence backend".into(),
            }),
        }
    }
}

impl<P, A, T> LedgerStore for SessionLedger<P, A, T>
where
    P: PersistenceClient,
    A: ActorProvider,
    T: TenantResolver,
{
    fn mode(&self) -> LedgerMode {
        match self {
            Self::Guest(l) => l.mode(),
            Self::Remote(l) => l.mode(),
        }
    }

    async fn list(&self, kind: RecordKind) -> MessmateResult<Vec<Record>> {
        match self {
            Self::Guest(l) => l.list(kind).await,
            Self::Remote(l) => l.list(kind).await,
        }
    }

    async fn snapshot(&self) -> MessmateResult<Snapshot> {
        match self {
            Self::Guest(l) => l.snapshot().await,
            Self::Remote(l) => l.snapshot().await,
        }
    }

    async fn create(&self, input: NewRecord) -> MessmateResult<Snapshot> {
        match self {
            Self::Guest(l) => l.create(input).await,
            Self::Remote(l) => l.create(input).await,
        }
    }

    async fn update(
        &self,
        kind: RecordKind,
        id: Uuid,
        input: RecordUpdate,
    ) -> MessmateResult<Snapshot> {
        match self {
            Self::Guest(l) => l.update(kind, id, input).await,
            Self::Remote(l) => l.update(kind, id, input).await,
        }
    }

    async fn delete(&self, kind: RecordKind, id: Uuid) -> MessmateResult<Snapshot> {
        match self {
            Self::Guest(l) => l.delete(kind, id).await,
            Self::Remote(l) => l.delete(kind, id).await,
        }
    }
}
