//! Trailing twelve-month window
//!
//! The window is anchored on the reference date (the latest measurement
//! date) and reaches back one calendar year. Year subtraction is
//! calendar-aware: 2016-02-29 minus one year is 2015-02-28.

use chrono::{Months, NaiveDate};
use serde::Serialize;

/// Date format used by the store and by the path parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// The trailing year ending at a reference date, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearWindow {
    pub start: NaiveDate,
    pub reference: NaiveDate,
}

impl YearWindow {
    /// Window ending at `reference`
    pub fn ending_at(reference: NaiveDate) -> Self {
        let start = reference
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDate::MIN);
        Self { start, reference }
    }

    /// Start bound in store format, for comparing against stored dates
    pub fn start_bound(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Whether a date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.reference
    }
}
