//! Data module - CSV loading, normalization and date filtering

mod categories;
mod filter;
mod loader;
mod record;

pub use categories::{Month, Season, WeatherCondition, Weekday};
pub use filter::{date_bounds, filter_by_date, DateRange};
pub use loader::DataLoader;
pub use record::RentalRecord;
