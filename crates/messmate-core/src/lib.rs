//! MessMate Core: shared domain types for the household meal ledger.
//!
//! This crate provides:
//! - Domain models for residents, meals, market purchases and bills
//! - [`period::Period`] calendar-month selection
//! - [`snapshot::Snapshot`], the four collections a session works against
//! - The reconciliation engine ([`reconciliation`], [`summary`])
//! - Boundary traits for ledger backends ([`repository`])
//!
//! Nothing here performs I/O.

pub mod error;
pub mod models;
pub mod period;
pub mod reconciliation;
pub mod repository;
pub mod snapshot;
pub mod summary;
