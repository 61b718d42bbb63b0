//! Meal record domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of meals one resident took on one day.
///
/// At most one record exists per `(resident_id, date)` and a stored
/// record never holds a zero count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub resident_id: Uuid,
    pub date: NaiveDate,
    pub meal_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMealRecord {
    pub resident_id: Uuid,
    pub date: NaiveDate,
    pub meal_count: u32,
}

/// The only partial patch the ledger allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMealCount {
    pub meal_count: u32,
}
