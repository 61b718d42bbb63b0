//! Calendar-month periods.
//!
//! A [`Period`] is selected by a `YYYY-MM` token and spans every day of
//! that month. Membership is decided on dates alone, so a record dated
//! on the last day of the month is always inside it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{MessmateError, MessmateResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Build the period for `month` (1-12) of `year`.
    pub fn new(year: i32, month: u32) -> MessmateResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| invalid(year, month))?;
        Self::starting_at(start).ok_or_else(|| invalid(year, month))
    }

    /// Parse a `YYYY-MM` token.
    pub fn parse(token: &str) -> MessmateResult<Self> {
        let malformed = || MessmateError::Validation {
            message: format!("expected a YYYY-MM month, got {token:?}"),
        };
        let (year, month) = token.trim().split_once('-').ok_or_else(malformed)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(malformed());
        }
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        Self::new(year, month)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        // Only the last month chrono can represent has no successor.
        Self::starting_at(start).unwrap_or(Self { start, end: NaiveDate::MAX })
    }

    /// The month containing today's date on the local clock.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    fn starting_at(start: NaiveDate) -> Option<Self> {
        let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self { start, end })
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// First day of the month (inclusive).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the month (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days_in_month(&self) -> u32 {
        self.end.day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// The date for a 1-based day of this month.
    pub fn date_for_day(&self, day: u32) -> Option<NaiveDate> {
        self.start.with_day(day)
    }

    pub fn previous(&self) -> Option<Self> {
        self.start
            .checked_sub_months(Months::new(1))
            .and_then(Self::starting_at)
    }

    pub fn next(&self) -> Option<Self> {
        self.start
            .checked_add_months(Months::new(1))
            .and_then(Self::starting_at)
    }

    /// Start of the first day and the last instant of the last day, in
    /// local wall-clock time.
    pub fn interval(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.start.and_time(NaiveTime::MIN);
        let end = self.end.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::nanoseconds(1);
        (start, end)
    }
}

fn invalid(year: i32, month: u32) -> MessmateError {
    MessmateError::Validation {
        message: format!("no such month: {year}-{month:02}"),
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Period {
    type Err = MessmateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = MessmateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
