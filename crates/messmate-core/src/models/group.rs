//! Group (tenant) domain model.
//!
//! A group is a household sharing one ledger. All residents, meals,
//! market entries and bills are scoped to a group.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant id reserved for guest sessions. Never persisted remotely.
pub const GUEST_TENANT_ID: Uuid = Uuid::nil();

/// Identity of an authenticated actor.
pub type ActorId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    pub name: String,
}
