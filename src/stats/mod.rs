//! Stats module - grouped rental aggregates

mod aggregator;
mod tables;

pub use aggregator::RentalAggregator;
pub use tables::{CountRow, CountTable, MonthlyTable, RentalSummary, RentalTotals, SeasonTable};
