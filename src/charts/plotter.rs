//! Chart Plotter Module
//! Creates interactive dashboard charts using egui_plot.

use super::format::{format_count, format_thousands_jt, format_units, human_format};
use crate::data::Month;
use crate::stats::{CountTable, MonthlyTable, RentalSummary, SeasonTable};
use chrono::{Days, NaiveDate};
use egui::{Align2, Color32};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, PlotUi, Points, Text};

/// Series colors
pub const TOTAL_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const REGISTERED_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const CASUAL_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(59, 76, 192),   // Cool blue
    Color32::from_rgb(98, 130, 234),  // Blue
    Color32::from_rgb(141, 176, 254), // Light blue
    Color32::from_rgb(184, 208, 249), // Pale blue
    Color32::from_rgb(221, 221, 221), // Neutral
    Color32::from_rgb(245, 196, 173), // Pale red
    Color32::from_rgb(244, 154, 123), // Light red
    Color32::from_rgb(222, 96, 77),   // Red
    Color32::from_rgb(180, 4, 38),    // Warm red
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const CHART_HEIGHT: f32 = 260.0;

/// A labelled bar of a categorical chart.
pub struct BarValue {
    pub label: String,
    pub value: u64,
}

impl BarValue {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Draws the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get the palette color for a bar position.
    pub fn get_bar_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Convert a categorical table into labelled bars.
    pub fn bars_from_table<K: PartialEq>(
        table: &CountTable<K>,
        label: impl Fn(&K) -> String,
    ) -> Vec<BarValue> {
        table
            .iter()
            .map(|row| BarValue::new(label(&row.key), row.count))
            .collect()
    }

    /// Value labels anchored at each point, formatted from the y value.
    fn value_labels(
        points: &[[f64; 2]],
        format: impl Fn(f64) -> String,
    ) -> Vec<(PlotPoint, String)> {
        points
            .iter()
            .map(|&[x, y]| (PlotPoint::new(x, y), format(y)))
            .collect()
    }

    /// Draw value labels just above their points.
    fn show_value_labels(plot_ui: &mut PlotUi, labels: Vec<(PlotPoint, String)>) {
        for (position, text) in labels {
            plot_ui.text(
                Text::new(position, text)
                    .anchor(Align2::CENTER_BOTTOM)
                    .color(Color32::GRAY),
            );
        }
    }

    /// Daily casual, registered and total rentals over the selected range.
    /// X-axis: days since the first date in the table.
    pub fn draw_daily_chart(ui: &mut egui::Ui, summary: &RentalSummary) {
        let Some(origin) = summary.daily_total.rows.first().map(|r| r.key) else {
            return;
        };

        let to_points = |table: &CountTable<NaiveDate>| -> PlotPoints {
            table
                .iter()
                .map(|row| [(row.key - origin).num_days() as f64, row.count as f64])
                .collect()
        };

        Plot::new("daily_rentals")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Date")
            .y_axis_label("Number of Rentals")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                if mark.value < 0.0 || mark.value.fract() != 0.0 {
                    return String::new();
                }
                origin
                    .checked_add_days(Days::new(mark.value as u64))
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .y_axis_formatter(|mark, _range| human_format(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(to_points(&summary.daily_total))
                        .color(TOTAL_COLOR)
                        .width(1.5)
                        .name("Total"),
                );
                plot_ui.line(
                    Line::new(to_points(&summary.daily_registered))
                        .color(REGISTERED_COLOR)
                        .width(1.5)
                        .name("Registered"),
                );
                plot_ui.line(
                    Line::new(to_points(&summary.daily_casual))
                        .color(CASUAL_COLOR)
                        .width(1.5)
                        .name("Casual"),
                );
            });
    }

    /// Monthly totals in canonical month order with point markers.
    pub fn draw_monthly_chart(ui: &mut egui::Ui, table: &MonthlyTable) {
        let points: Vec<[f64; 2]> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| [i as f64, row.count as f64])
            .collect();
        let labels = Self::value_labels(&points, format_thousands_jt);

        Plot::new("monthly_rentals")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Month")
            .y_axis_label("Number of Rentals")
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| Self::month_tick(mark.value))
            .y_axis_formatter(|mark, _range| format_thousands_jt(mark.value))
            .label_formatter(|_name, value| {
                format!(
                    "{}\n{}",
                    Self::month_tick(value.x.round()),
                    format_thousands_jt(value.y)
                )
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(TOTAL_COLOR)
                        .width(3.0)
                        .name("Total Rentals"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(5.0)
                        .color(TOTAL_COLOR),
                );
                Self::show_value_labels(plot_ui, labels);
            });
    }

    fn month_tick(value: f64) -> String {
        if value < 0.0 || value.fract() != 0.0 {
            return String::new();
        }
        Month::ALL
            .get(value as usize)
            .map(|m| m.label().to_string())
            .unwrap_or_default()
    }

    /// Registered and casual rentals side by side for each season.
    pub fn draw_season_chart(ui: &mut egui::Ui, table: &SeasonTable) {
        let labels: Vec<String> = table
            .rows
            .iter()
            .map(|r| r.season.label().to_string())
            .collect();

        let registered: Vec<Bar> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new(i as f64 - 0.2, r.registered as f64)
                    .width(0.4)
                    .name(r.season.label())
            })
            .collect();
        let casual: Vec<Bar> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new(i as f64 + 0.2, r.casual as f64)
                    .width(0.4)
                    .name(r.season.label())
            })
            .collect();
        let bar_tops: Vec<[f64; 2]> = registered
            .iter()
            .chain(casual.iter())
            .map(|bar| [bar.argument, bar.value])
            .collect();
        let value_labels = Self::value_labels(&bar_tops, format_units);

        Plot::new("season_rentals")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Season")
            .y_axis_label("Number of Rentals")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| Self::category_tick(&labels, mark.value))
            .y_axis_formatter(|mark, _range| format_units(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(registered)
                        .color(REGISTERED_COLOR)
                        .name("registered")
                        .element_formatter(Box::new(|bar, _chart| {
                            format!("{}: {}", bar.name, format_units(bar.value))
                        })),
                );
                plot_ui.bar_chart(
                    BarChart::new(casual)
                        .color(CASUAL_COLOR)
                        .name("casual")
                        .element_formatter(Box::new(|bar, _chart| {
                            format!("{}: {}", bar.name, format_units(bar.value))
                        })),
                );
                Self::show_value_labels(plot_ui, value_labels);
            });
    }

    /// Single-measure bar chart over categorical labels.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, x_label: &str, values: &[BarValue]) {
        let labels: Vec<String> = values.iter().map(|v| v.label.clone()).collect();
        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Bar::new(i as f64, v.value as f64)
                    .width(0.7)
                    .name(&v.label)
                    .fill(Self::get_bar_color(i * PALETTE.len() / values.len().max(1)))
            })
            .collect();
        let bar_tops: Vec<[f64; 2]> = bars.iter().map(|bar| [bar.argument, bar.value]).collect();
        let value_labels = Self::value_labels(&bar_tops, human_format);

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label("Number of Rentals")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| Self::category_tick(&labels, mark.value))
            .y_axis_formatter(|mark, _range| human_format(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).element_formatter(Box::new(
                    |bar, _chart| format!("{}: {}", bar.name, format_count(bar.value as u64)),
                )));
                Self::show_value_labels(plot_ui, value_labels);
            });
    }

    fn category_tick(labels: &[String], value: f64) -> String {
        if value < 0.0 || value.fract() != 0.0 {
            return String::new();
        }
        labels.get(value as usize).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Weekday;
    use crate::stats::CountRow;

    #[test]
    fn test_bars_from_table_keeps_order() {
        let table = CountTable {
            rows: vec![
                CountRow {
                    key: Weekday::Sun,
                    count: 5,
                },
                CountRow {
                    key: Weekday::Sat,
                    count: 7,
                },
            ],
        };
        let bars = ChartPlotter::bars_from_table(&table, |k| k.label().to_string());

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, "Sun");
        assert_eq!(bars[1].value, 7);
    }

    #[test]
    fn test_month_tick_labels() {
        assert_eq!(ChartPlotter::month_tick(0.0), "Jan");
        assert_eq!(ChartPlotter::month_tick(11.0), "Dec");
        assert_eq!(ChartPlotter::month_tick(12.0), "");
        assert_eq!(ChartPlotter::month_tick(2.5), "");
    }

    #[test]
    fn test_value_labels_sit_on_each_point() {
        let labels =
            ChartPlotter::value_labels(&[[0.0, 1500.0], [1.0, 2_500_000.0]], human_format);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].0, PlotPoint::new(0.0, 1500.0));
        assert_eq!(labels[0].1, human_format(1500.0));
        assert_eq!(labels[1].0.x, 1.0);
        assert_eq!(labels[1].1, human_format(2_500_000.0));
    }

    #[test]
    fn test_category_tick_out_of_range() {
        let labels = vec!["No".to_string(), "Yes".to_string()];
        assert_eq!(ChartPlotter::category_tick(&labels, 1.0), "Yes");
        assert_eq!(ChartPlotter::category_tick(&labels, -1.0), "");
        assert_eq!(ChartPlotter::category_tick(&labels, 2.0), "");
    }
}
