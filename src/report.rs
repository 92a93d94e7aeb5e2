//! Summary Report Export
//! Writes the selected range, headline totals and every summary table as JSON.

use crate::stats::RentalSummary;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Report exporter for dashboard summaries
pub struct ReportExporter;

impl ReportExporter {
    /// Render a summary as pretty-printed JSON.
    pub fn summary_json(summary: &RentalSummary) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(summary)?)
    }

    /// Write a summary to `output_path`, replacing any existing file.
    pub fn export_summary_json(
        summary: &RentalSummary,
        output_path: &Path,
    ) -> Result<(), ExportError> {
        let json = Self::summary_json(summary)?;
        fs::write(output_path, json)?;

        info!(
            path = %output_path.display(),
            records = summary.record_count,
            "summary exported"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DateRange, Month, RentalRecord, Season, WeatherCondition, Weekday};
    use crate::stats::RentalAggregator;
    use chrono::NaiveDate;
    use serde_json::Value;

    fn summary() -> RentalSummary {
        let date = NaiveDate::from_ymd_opt(2011, 3, 21).unwrap();
        let records = vec![RentalRecord {
            date,
            year: 0,
            season: Season::Summer,
            month: Month::Mar,
            weekday: Weekday::Mon,
            working_day: true,
            holiday: false,
            weather_condition: WeatherCondition::MistyCloudy,
            casual_count: 120,
            registered_count: 1000,
            total_count: 1120,
        }];
        RentalAggregator::summarize(&records, Some(DateRange::new(date, date)))
    }

    #[test]
    fn test_summary_json_shape() {
        let json = ReportExporter::summary_json(&summary()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["range"]["start"], "2011-03-21");
        assert_eq!(value["totals"]["total"], 1120);
        assert_eq!(value["by_month"]["rows"].as_array().unwrap().len(), 12);
        assert_eq!(value["by_month"]["rows"][2]["key"], "Mar");
        assert_eq!(value["by_month"]["rows"][2]["count"], 1120);
        assert_eq!(value["by_season"][0]["season"], "Summer");
        assert_eq!(value["by_weather_condition"][0]["key"], "Misty/Cloudy");
        assert_eq!(value["daily_total"][0]["key"], "2011-03-21");
        assert_eq!(value["by_working_day"][0]["key"], true);
    }

    #[test]
    fn test_export_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "bike_rental_summary_{}.json",
            std::process::id()
        ));
        ReportExporter::export_summary_json(&summary(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();
        assert!(written.contains("\"registered\": 1000"));
    }
}
