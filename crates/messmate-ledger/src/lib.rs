//! MessMate Ledger: the two ledger store backends and the record
//! repository sessions work through.
//!
//! Generic over the boundary traits in `messmate-core` so that this
//! crate has no dependency on a database.

pub mod config;
pub mod ephemeral;
pub mod remote;
pub mod repository;
pub mod seed;
pub mod session;

pub use config::LedgerConfig;
pub use ephemeral::EphemeralLedger;
pub use remote::{RemoteLedger, SignedInActor};
pub use repository::{MutationOutcome, RecordRepository};
pub use session::SessionLedger;
