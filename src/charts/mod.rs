//! Charts module - Chart rendering and number formatting

mod format;
mod plotter;

pub use format::format_count;
pub use plotter::ChartPlotter;
