//! Shared bill domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A household-wide cost (rent, utilities, staff) that is not tied to a
/// resident. Bills in a period form its fixed-fee pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    /// Strictly positive.
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBillRecord {
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBillRecord {
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}
