//! CSV Data Loader Module
//! Reads the daily rental CSV with Polars, normalizes column names and
//! decodes the categorical codes into typed records.

use super::categories::{Month, Season, WeatherCondition, Weekday};
use super::record::RentalRecord;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Columns not needed downstream. Absent columns are skipped.
pub const DROPPED_COLUMNS: [&str; 1] = ["windspeed"];

/// Raw dataset identifiers and their semantic names.
pub const COLUMN_RENAMES: [(&str, &str); 8] = [
    ("dteday", "date"),
    ("yr", "year"),
    ("mnth", "month"),
    ("weathersit", "weather_condition"),
    ("workingday", "working_day"),
    ("casual", "casual_count"),
    ("registered", "registered_count"),
    ("cnt", "total_count"),
];

/// Columns every normalized frame must carry.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "date",
    "season",
    "year",
    "month",
    "holiday",
    "weekday",
    "working_day",
    "weather_condition",
    "casual_count",
    "registered_count",
    "total_count",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp layouts accepted in the date column. Only the date part is kept.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },
    #[error("Negative count {value} in column '{column}' at row {row}")]
    NegativeCount {
        column: String,
        row: usize,
        value: i64,
    },
    #[error("Non-integer value {value} in column '{column}' at row {row}")]
    NonIntegerValue {
        column: String,
        row: usize,
        value: f64,
    },
    #[error("Invalid flag {value} in column '{column}' at row {row}, expected 0 or 1")]
    InvalidFlag {
        column: String,
        row: usize,
        value: i64,
    },
    #[error("Invalid date '{value}' at row {row}")]
    InvalidDate { value: String, row: usize },
}

/// Loads the rental dataset. Every step is a pure function of its input.
pub struct DataLoader;

impl DataLoader {
    /// Read, normalize and decode a CSV file in one go.
    pub fn load(path: &Path) -> Result<Vec<RentalRecord>, LoaderError> {
        info!(path = %path.display(), "loading rental dataset");

        let df = Self::read_csv(path)?;
        let df = Self::normalize_columns(df)?;
        let records = Self::to_records(&df)?;

        info!(rows = records.len(), "rental dataset loaded");
        Ok(records)
    }

    /// Load a CSV file using Polars.
    pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        debug!(rows = df.height(), columns = df.width(), "csv parsed");
        Ok(df)
    }

    /// Drop unused columns, rename raw identifiers and check that every
    /// required column is present.
    pub fn normalize_columns(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
        for name in DROPPED_COLUMNS {
            if df.column(name).is_ok() {
                df.drop_in_place(name)?;
                debug!(column = name, "dropped unused column");
            }
        }

        for (raw, semantic) in COLUMN_RENAMES {
            if df.column(raw).is_ok() {
                df.rename(raw, semantic.into())?;
                debug!(from = raw, to = semantic, "renamed column");
            }
        }

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|name| df.column(name).is_err())
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        Ok(df)
    }

    /// Decode a normalized frame into typed records.
    pub fn to_records(df: &DataFrame) -> Result<Vec<RentalRecord>, LoaderError> {
        let dates = Self::date_values(df, "date")?;
        let years = Self::int_values(df, "year")?;
        let seasons = Self::int_values(df, "season")?;
        let months = Self::int_values(df, "month")?;
        let weekdays = Self::int_values(df, "weekday")?;
        let working_days = Self::flag_values(df, "working_day")?;
        let holidays = Self::flag_values(df, "holiday")?;
        let weather = Self::int_values(df, "weather_condition")?;
        let casual = Self::count_values(df, "casual_count")?;
        let registered = Self::count_values(df, "registered_count")?;
        let total = Self::count_values(df, "total_count")?;

        let records: Vec<RentalRecord> = (0..df.height())
            .map(|i| RentalRecord {
                date: dates[i],
                year: years[i],
                season: Season::from_code(seasons[i]),
                month: Month::from_code(months[i]),
                weekday: Weekday::from_code(weekdays[i]),
                working_day: working_days[i],
                holiday: holidays[i],
                weather_condition: WeatherCondition::from_code(weather[i]),
                casual_count: casual[i],
                registered_count: registered[i],
                total_count: total[i],
            })
            .collect();

        let inconsistent = records.iter().filter(|r| !r.is_consistent()).count();
        if inconsistent > 0 {
            warn!(
                rows = inconsistent,
                "records where casual + registered != total"
            );
        }

        Ok(records)
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
        df.column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))
    }

    fn int_values(df: &DataFrame, name: &str) -> Result<Vec<i64>, LoaderError> {
        let column = Self::column(df, name)?;
        // Casting floats to Int64 truncates, so fractional values are rejected first.
        if column.dtype().is_float() {
            let floats = column.cast(&DataType::Float64)?;
            let fractional = floats
                .f64()?
                .into_iter()
                .enumerate()
                .find_map(|(row, v)| v.filter(|x| x.fract() != 0.0).map(|x| (row, x)));
            if let Some((row, value)) = fractional {
                return Err(LoaderError::NonIntegerValue {
                    column: name.to_string(),
                    row,
                    value,
                });
            }
        }

        let casted = column.cast(&DataType::Int64)?;
        let values = casted.i64()?;

        values
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                v.ok_or_else(|| LoaderError::MissingValue {
                    column: name.to_string(),
                    row,
                })
            })
            .collect()
    }

    fn count_values(df: &DataFrame, name: &str) -> Result<Vec<u64>, LoaderError> {
        Self::int_values(df, name)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                u64::try_from(value).map_err(|_| LoaderError::NegativeCount {
                    column: name.to_string(),
                    row,
                    value,
                })
            })
            .collect()
    }

    fn flag_values(df: &DataFrame, name: &str) -> Result<Vec<bool>, LoaderError> {
        Self::int_values(df, name)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(LoaderError::InvalidFlag {
                    column: name.to_string(),
                    row,
                    value,
                }),
            })
            .collect()
    }

    fn parse_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, DATE_FORMAT).ok().or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
    }

    fn date_values(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>, LoaderError> {
        // Parsed date columns cast back to ISO strings.
        let casted = Self::column(df, name)?.cast(&DataType::String)?;
        let values = casted.str()?;

        values
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                let raw = v.ok_or_else(|| LoaderError::MissingValue {
                    column: name.to_string(),
                    row,
                })?;
                Self::parse_date(raw).ok_or_else(|| LoaderError::InvalidDate {
                    value: raw.to_string(),
                    row,
                })
            })
            .collect()
    }
}
