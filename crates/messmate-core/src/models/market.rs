//! Market purchase domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Groceries bought by a resident on behalf of the household.
/// Several entries per resident and day are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub resident_id: Uuid,
    pub date: NaiveDate,
    /// Strictly positive.
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMarketRecord {
    pub resident_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMarketRecord {
    pub resident_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
}
