//! Resident domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person living in the household and sharing its meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResident {
    pub name: String,
    pub join_date: NaiveDate,
}

/// Full replacement of a resident's mutable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResident {
    pub name: String,
    pub join_date: NaiveDate,
}
