//! Summary tables produced by the aggregator and consumed by the dashboard.

use crate::data::{DateRange, Month, Season, WeatherCondition, Weekday};
use chrono::NaiveDate;
use serde::Serialize;

/// One group of a keyed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow<K> {
    pub key: K,
    pub count: u64,
}

/// Grouped sums of a single measure, ascending by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountTable<K> {
    pub rows: Vec<CountRow<K>>,
}

impl<K> Default for CountTable<K> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<K: PartialEq> CountTable<K> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum across all groups.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.rows.iter().find(|r| &r.key == key).map(|r| r.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountRow<K>> {
        self.rows.iter()
    }
}

/// Registered and casual rentals for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonRow {
    pub season: Season,
    pub registered: u64,
    pub casual: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeasonTable {
    pub rows: Vec<SeasonRow>,
}

impl SeasonTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Monthly totals, always twelve rows in January..December order.
///
/// Rows with an unmapped month code have no canonical slot; their total is
/// kept in `unknown` so the table still accounts for every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTable {
    pub rows: Vec<CountRow<Month>>,
    pub unknown: u64,
}

impl Default for MonthlyTable {
    fn default() -> Self {
        Self {
            rows: Month::ALL
                .iter()
                .map(|&key| CountRow { key, count: 0 })
                .collect(),
            unknown: 0,
        }
    }
}

impl MonthlyTable {
    pub fn get(&self, month: Month) -> Option<u64> {
        month.index().map(|i| self.rows[i].count)
    }

    /// Sum of the canonical rows plus the unknown bucket.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum::<u64>() + self.unknown
    }
}

/// Headline metrics shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RentalTotals {
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

/// Every table the dashboard renders for one date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RentalSummary {
    pub range: Option<DateRange>,
    pub record_count: usize,
    pub totals: RentalTotals,
    pub daily_total: CountTable<NaiveDate>,
    pub daily_casual: CountTable<NaiveDate>,
    pub daily_registered: CountTable<NaiveDate>,
    pub by_season: SeasonTable,
    pub by_month: MonthlyTable,
    pub by_weekday: CountTable<Weekday>,
    pub by_working_day: CountTable<bool>,
    pub by_holiday: CountTable<bool>,
    pub by_weather_condition: CountTable<WeatherCondition>,
}
