//! SurrealDB repository implementations.

mod group;
mod ledger;

pub use group::SurrealGroupRepository;
pub use ledger::SurrealPersistenceClient;
