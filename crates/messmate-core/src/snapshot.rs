//! A point-in-time copy of a tenant's four collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::bill::BillRecord;
use crate::models::market::MarketRecord;
use crate::models::meal::MealRecord;
use crate::models::record::{Record, RecordKind};
use crate::models::resident::Resident;
use crate::period::Period;

/// The collections a session reads from. Ledger stores hand out a fresh
/// snapshot after every successful mutation; consumers never patch one.
///
/// Ordering: residents and meals in insertion order, market entries
/// newest first, bills by date newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub residents: Vec<Resident>,
    pub meals: Vec<MealRecord>,
    pub market: Vec<MarketRecord>,
    pub bills: Vec<BillRecord>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
            && self.meals.is_empty()
            && self.market.is_empty()
            && self.bills.is_empty()
    }

    pub fn resident(&self, id: Uuid) -> Option<&Resident> {
        self.residents.iter().find(|r| r.id == id)
    }

    /// The meal cell for a resident on a date, if one is stored.
    pub fn meal_for(&self, resident_id: Uuid, date: NaiveDate) -> Option<&MealRecord> {
        self.meals
            .iter()
            .find(|m| m.resident_id == resident_id && m.date == date)
    }

    pub fn meals_in(&self, period: &Period) -> impl Iterator<Item = &MealRecord> {
        self.meals.iter().filter(move |m| period.contains(m.date))
    }

    pub fn market_in(&self, period: &Period) -> impl Iterator<Item = &MarketRecord> {
        self.market.iter().filter(move |m| period.contains(m.date))
    }

    pub fn bills_in(&self, period: &Period) -> impl Iterator<Item = &BillRecord> {
        self.bills.iter().filter(move |b| period.contains(b.date))
    }

    /// The `limit` most recently added market entries.
    pub fn recent_market(&self, limit: usize) -> &[MarketRecord] {
        &self.market[..self.market.len().min(limit)]
    }

    /// Records of one kind, wrapped.
    pub fn records(&self, kind: RecordKind) -> Vec<Record> {
        match kind {
            RecordKind::Residents => self.residents.iter().cloned().map(Record::Resident).collect(),
            RecordKind::Meals => self.meals.iter().cloned().map(Record::Meal).collect(),
            RecordKind::Market => self.market.iter().cloned().map(Record::Market).collect(),
            RecordKind::Bills => self.bills.iter().cloned().map(Record::Bill).collect(),
        }
    }

    /// Rebuild a snapshot from store listings, keeping listing order.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut snapshot = Self::default();
        for record in records {
            match record {
                Record::Resident(r) => snapshot.residents.push(r),
                Record::Meal(m) => snapshot.meals.push(m),
                Record::Market(m) => snapshot.market.push(m),
                Record::Bill(b) => snapshot.bills.push(b),
            }
        }
        snapshot
    }
}
