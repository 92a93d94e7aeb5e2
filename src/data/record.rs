//! Normalized rental record - one row of the daily dataset after decoding.

use super::categories::{Month, Season, WeatherCondition, Weekday};
use chrono::NaiveDate;
use serde::Serialize;

/// A single day of rentals with categorical codes decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalRecord {
    pub date: NaiveDate,
    /// Raw year code from the dataset (0 = first year, 1 = second year).
    pub year: i64,
    pub season: Season,
    pub month: Month,
    pub weekday: Weekday,
    pub working_day: bool,
    pub holiday: bool,
    pub weather_condition: WeatherCondition,
    pub casual_count: u64,
    pub registered_count: u64,
    pub total_count: u64,
}

impl RentalRecord {
    /// Dataset invariant: casual and registered rentals add up to the total.
    pub fn is_consistent(&self) -> bool {
        self.casual_count + self.registered_count == self.total_count
    }
}
