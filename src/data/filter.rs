//! Date-Range Filter
//! Selects the records whose date falls inside an inclusive range.

use super::record::RentalRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Inclusive `[start, end]` date range selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Keep both ends within `[min, max]`.
    pub fn clamp(&self, min: NaiveDate, max: NaiveDate) -> Self {
        Self {
            start: self.start.clamp(min, max),
            end: self.end.clamp(min, max),
        }
    }

    /// Number of calendar days covered, 0 when `start > end`.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

/// Earliest and latest date in the dataset, `None` when it is empty.
pub fn date_bounds(records: &[RentalRecord]) -> Option<DateRange> {
    let min = records.iter().map(|r| r.date).min()?;
    let max = records.iter().map(|r| r.date).max()?;
    Some(DateRange::new(min, max))
}

/// Records dated within `range`, in input order. `start > end` selects nothing.
pub fn filter_by_date(records: &[RentalRecord], range: DateRange) -> Vec<RentalRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.date))
        .cloned()
        .collect()
}
