//! Rental Aggregator Module
//! Groups a filtered record set by one key and sums the rental counts.
//!
//! Each table is computed independently from the same slice. Group
//! membership depends only on key equality, so input order never changes a
//! sum; keyed tables come out ascending by key.

use super::tables::{
    CountRow, CountTable, MonthlyTable, RentalSummary, RentalTotals, SeasonRow, SeasonTable,
};
use crate::data::{DateRange, RentalRecord, Season, WeatherCondition, Weekday};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Builds the dashboard's summary tables.
pub struct RentalAggregator;

impl RentalAggregator {
    /// Group by `key` and sum `measure` within each group.
    fn sum_by<K, F, M>(records: &[RentalRecord], key: F, measure: M) -> CountTable<K>
    where
        K: Ord,
        F: Fn(&RentalRecord) -> K,
        M: Fn(&RentalRecord) -> u64,
    {
        let mut groups: BTreeMap<K, u64> = BTreeMap::new();
        for record in records {
            *groups.entry(key(record)).or_insert(0) += measure(record);
        }

        CountTable {
            rows: groups
                .into_iter()
                .map(|(key, count)| CountRow { key, count })
                .collect(),
        }
    }

    pub fn by_date_total(records: &[RentalRecord]) -> CountTable<NaiveDate> {
        Self::sum_by(records, |r| r.date, |r| r.total_count)
    }

    pub fn by_date_casual(records: &[RentalRecord]) -> CountTable<NaiveDate> {
        Self::sum_by(records, |r| r.date, |r| r.casual_count)
    }

    pub fn by_date_registered(records: &[RentalRecord]) -> CountTable<NaiveDate> {
        Self::sum_by(records, |r| r.date, |r| r.registered_count)
    }

    /// Registered and casual sums per season.
    pub fn by_season(records: &[RentalRecord]) -> SeasonTable {
        let mut groups: BTreeMap<Season, (u64, u64)> = BTreeMap::new();
        for record in records {
            let entry = groups.entry(record.season).or_insert((0, 0));
            entry.0 += record.registered_count;
            entry.1 += record.casual_count;
        }

        SeasonTable {
            rows: groups
                .into_iter()
                .map(|(season, (registered, casual))| SeasonRow {
                    season,
                    registered,
                    casual,
                })
                .collect(),
        }
    }

    /// Totals re-indexed to January..December, absent months as zero.
    pub fn by_month(records: &[RentalRecord]) -> MonthlyTable {
        let mut table = MonthlyTable::default();
        for record in records {
            match record.month.index() {
                Some(i) => table.rows[i].count += record.total_count,
                None => table.unknown += record.total_count,
            }
        }
        table
    }

    pub fn by_weekday(records: &[RentalRecord]) -> CountTable<Weekday> {
        Self::sum_by(records, |r| r.weekday, |r| r.total_count)
    }

    pub fn by_working_day(records: &[RentalRecord]) -> CountTable<bool> {
        Self::sum_by(records, |r| r.working_day, |r| r.total_count)
    }

    pub fn by_holiday(records: &[RentalRecord]) -> CountTable<bool> {
        Self::sum_by(records, |r| r.holiday, |r| r.total_count)
    }

    pub fn by_weather_condition(records: &[RentalRecord]) -> CountTable<WeatherCondition> {
        Self::sum_by(records, |r| r.weather_condition, |r| r.total_count)
    }

    /// Compute every table for an already filtered slice.
    pub fn summarize(records: &[RentalRecord], range: Option<DateRange>) -> RentalSummary {
        let daily_total = Self::by_date_total(records);
        let daily_casual = Self::by_date_casual(records);
        let daily_registered = Self::by_date_registered(records);

        let totals = RentalTotals {
            casual: daily_casual.total(),
            registered: daily_registered.total(),
            total: daily_total.total(),
        };

        RentalSummary {
            range,
            record_count: records.len(),
            totals,
            daily_total,
            daily_casual,
            daily_registered,
            by_season: Self::by_season(records),
            by_month: Self::by_month(records),
            by_weekday: Self::by_weekday(records),
            by_working_day: Self::by_working_day(records),
            by_holiday: Self::by_holiday(records),
            by_weather_condition: Self::by_weather_condition(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{date_bounds, filter_by_date, Month};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        day: &str,
        casual: u64,
        registered: u64,
        season: i64,
        month: i64,
        weekday: i64,
        working_day: bool,
        holiday: bool,
        weather: i64,
    ) -> RentalRecord {
        RentalRecord {
            date: date(day),
            year: 0,
            season: Season::from_code(season),
            month: Month::from_code(month),
            weekday: Weekday::from_code(weekday),
            working_day,
            holiday,
            weather_condition: WeatherCondition::from_code(weather),
            casual_count: casual,
            registered_count: registered,
            total_count: casual + registered,
        }
    }

    fn two_day_dataset() -> Vec<RentalRecord> {
        vec![
            record("2021-01-01", 10, 40, 1, 1, 5, true, false, 1),
            record("2021-07-15", 30, 20, 2, 7, 4, true, false, 2),
        ]
    }

    #[test]
    fn test_two_day_scenario() {
        let records = two_day_dataset();
        let range = date_bounds(&records).unwrap();
        let filtered = filter_by_date(&records, range);

        let seasons = RentalAggregator::by_season(&filtered);
        assert_eq!(
            seasons.rows,
            vec![
                SeasonRow {
                    season: Season::Spring,
                    registered: 40,
                    casual: 10
                },
                SeasonRow {
                    season: Season::Summer,
                    registered: 20,
                    casual: 30
                },
            ]
        );

        let months = RentalAggregator::by_month(&filtered);
        assert_eq!(months.get(Month::Jan), Some(50));
        assert_eq!(months.get(Month::Jul), Some(50));
        let zero_months = months.rows.iter().filter(|r| r.count == 0).count();
        assert_eq!(zero_months, 10);

        let daily = RentalAggregator::by_date_total(&filtered);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily.total(), 100);
    }

    #[test]
    fn test_month_table_has_canonical_order() {
        let records = vec![
            record("2011-12-01", 1, 1, 4, 12, 4, true, false, 1),
            record("2011-03-01", 2, 2, 1, 3, 2, true, false, 1),
        ];
        let months = RentalAggregator::by_month(&records);

        let keys: Vec<Month> = months.rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, Month::ALL.to_vec());
        assert_eq!(months.get(Month::Mar), Some(4));
        assert_eq!(months.get(Month::Dec), Some(2));
        assert_eq!(months.get(Month::Jun), Some(0));
    }

    #[test]
    fn test_empty_input() {
        let summary = RentalAggregator::summarize(&[], None);

        assert!(summary.daily_total.is_empty());
        assert!(summary.daily_casual.is_empty());
        assert!(summary.daily_registered.is_empty());
        assert!(summary.by_season.is_empty());
        assert!(summary.by_weekday.is_empty());
        assert!(summary.by_working_day.is_empty());
        assert!(summary.by_holiday.is_empty());
        assert!(summary.by_weather_condition.is_empty());
        assert_eq!(summary.by_month.rows.len(), 12);
        assert!(summary.by_month.rows.iter().all(|r| r.count == 0));
        assert_eq!(summary.totals, RentalTotals::default());
    }

    #[test]
    fn test_total_is_conserved_across_tables() {
        let records = vec![
            record("2011-01-01", 331, 654, 1, 1, 6, false, false, 2),
            record("2011-01-02", 131, 670, 1, 1, 0, false, false, 2),
            record("2011-01-02", 5, 5, 1, 1, 0, false, false, 2),
            record("2011-01-03", 120, 1229, 1, 1, 1, true, false, 1),
            record("2011-01-17", 117, 883, 1, 1, 1, false, true, 2),
            record("2011-02-03", 70, 1000, 1, 14, 4, true, false, 9),
        ];
        let expected: u64 = records.iter().map(|r| r.total_count).sum();
        let summary = RentalAggregator::summarize(&records, None);

        assert_eq!(summary.daily_total.total(), expected);
        assert_eq!(summary.by_month.total(), expected);
        assert_eq!(summary.by_weekday.total(), expected);
        assert_eq!(summary.by_working_day.total(), expected);
        assert_eq!(summary.by_holiday.total(), expected);
        assert_eq!(summary.by_weather_condition.total(), expected);
        assert_eq!(summary.totals.total, expected);
        assert_eq!(
            summary.totals.casual + summary.totals.registered,
            summary.totals.total
        );
        assert_eq!(summary.by_month.unknown, 1070);
    }

    #[test]
    fn test_same_date_rows_share_a_group() {
        let records = vec![
            record("2011-01-02", 1, 2, 1, 1, 0, false, false, 1),
            record("2011-01-01", 3, 4, 1, 1, 6, false, false, 1),
            record("2011-01-02", 5, 6, 1, 1, 0, false, false, 1),
        ];
        let casual = RentalAggregator::by_date_casual(&records);
        let registered = RentalAggregator::by_date_registered(&records);

        assert_eq!(casual.rows[0].key, date("2011-01-01"));
        assert_eq!(casual.get(&date("2011-01-02")), Some(6));
        assert_eq!(registered.get(&date("2011-01-02")), Some(8));
    }

    #[test]
    fn test_grouping_is_order_independent() {
        let mut records = two_day_dataset();
        records.push(record("2021-07-16", 7, 3, 3, 7, 5, false, true, 3));
        let forward = RentalAggregator::summarize(&records, None);
        records.reverse();
        let backward = RentalAggregator::summarize(&records, None);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_flag_and_category_tables() {
        let records = vec![
            record("2011-01-01", 10, 10, 1, 1, 6, false, false, 1),
            record("2011-01-02", 5, 5, 1, 1, 0, false, true, 3),
            record("2011-01-03", 1, 1, 1, 1, 1, true, false, 1),
        ];

        let working = RentalAggregator::by_working_day(&records);
        assert_eq!(working.rows[0], CountRow { key: false, count: 30 });
        assert_eq!(working.rows[1], CountRow { key: true, count: 2 });

        let holiday = RentalAggregator::by_holiday(&records);
        assert_eq!(holiday.get(&true), Some(10));
        assert_eq!(holiday.get(&false), Some(22));

        let weekday = RentalAggregator::by_weekday(&records);
        let keys: Vec<Weekday> = weekday.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![Weekday::Sun, Weekday::Mon, Weekday::Sat]);

        let weather = RentalAggregator::by_weather_condition(&records);
        assert_eq!(weather.get(&WeatherCondition::ClearPartlyCloudy), Some(22));
        assert_eq!(weather.get(&WeatherCondition::LightSnowRain), Some(10));
        assert_eq!(weather.get(&WeatherCondition::SevereWeather), None);
    }
}
