//! Error types for the MessMate ledger.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessmateError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    /// No actor is signed in, or the actor is not a member of any group.
    #[error("Tenant context missing or invalid")]
    TenantContext,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type MessmateResult<T> = Result<T, MessmateError>;
