//! Domain models for MessMate.
//!
//! Every record belongs to exactly one tenant (a household group).

pub mod bill;
pub mod group;
pub mod market;
pub mod meal;
pub mod record;
pub mod resident;

pub use group::{ActorId, GUEST_TENANT_ID};
