//! MessMate Database: SurrealDB connection management and the
//! persistence behind remote ledger sessions.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - A [`PersistenceClient`](messmate_core::repository::PersistenceClient)
//!   and group membership ([`repository`])
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
