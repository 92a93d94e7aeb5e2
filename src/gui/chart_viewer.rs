//! Chart Viewer Widget
//! Central scrollable panel showing headline metrics and every dashboard chart.

use crate::charts::{format_count, ChartPlotter};
use crate::stats::{RentalSummary, RentalTotals};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 20.0;

/// Scrollable dashboard area fed with the summary of the selected range.
#[derive(Default)]
pub struct ChartViewer {
    pub summary: Option<RentalSummary>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.summary = None;
    }

    pub fn set_summary(&mut self, summary: RentalSummary) {
        self.summary = Some(summary);
    }

    /// Draw the dashboard
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(summary) = &self.summary else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("Bike Rental Dashboard 🚲").size(26.0).strong());
                if let Some(range) = summary.range {
                    ui.label(
                        RichText::new(format!(
                            "{} to {} ({} days)",
                            range.start,
                            range.end,
                            range.days()
                        ))
                        .color(Color32::GRAY),
                    );
                }
                ui.add_space(SECTION_SPACING);

                // ===== Daily Rentals =====
                Self::section_title(ui, "Daily Rentals");
                Self::draw_metrics(ui, &summary.totals);
                ui.add_space(10.0);
                if summary.daily_total.is_empty() {
                    ui.label(RichText::new("No rentals in the selected range").color(Color32::GRAY));
                } else {
                    ChartPlotter::draw_daily_chart(ui, summary);
                }
                ui.add_space(SECTION_SPACING);

                // ===== Monthly Rentals =====
                Self::section_title(ui, "Monthly Rentals");
                ChartPlotter::draw_monthly_chart(ui, &summary.by_month);
                if summary.by_month.unknown > 0 {
                    ui.label(
                        RichText::new(format!(
                            "{} rentals with an unmapped month code",
                            format_count(summary.by_month.unknown)
                        ))
                        .size(11.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                    );
                }
                ui.add_space(SECTION_SPACING);

                // ===== Seasonal Rentals =====
                Self::section_title(ui, "Seasonly Rentals");
                ChartPlotter::draw_season_chart(ui, &summary.by_season);
                ui.add_space(SECTION_SPACING);

                // ===== Weekday / Working day / Holiday =====
                Self::section_title(ui, "Weekday, Workingday, and Holiday Rentals");
                let yes_no = |flag: &bool| String::from(if *flag { "Yes" } else { "No" });

                ui.label(RichText::new("Number of Rentals based on Working Day").strong());
                ChartPlotter::draw_bar_chart(
                    ui,
                    "working_day_rentals",
                    "Working Day",
                    &ChartPlotter::bars_from_table(&summary.by_working_day, yes_no),
                );
                ui.add_space(10.0);

                ui.label(RichText::new("Number of Rentals based on Holiday").strong());
                ChartPlotter::draw_bar_chart(
                    ui,
                    "holiday_rentals",
                    "Holiday",
                    &ChartPlotter::bars_from_table(&summary.by_holiday, yes_no),
                );
                ui.add_space(10.0);

                ui.label(RichText::new("Number of Rentals based on Weekday").strong());
                ChartPlotter::draw_bar_chart(
                    ui,
                    "weekday_rentals",
                    "Day of the Week",
                    &ChartPlotter::bars_from_table(&summary.by_weekday, |d| d.label().to_string()),
                );
                ui.add_space(SECTION_SPACING);

                // ===== Weather =====
                Self::section_title(ui, "Weather Condition Rentals");
                ChartPlotter::draw_bar_chart(
                    ui,
                    "weather_rentals",
                    "Weather Condition",
                    &ChartPlotter::bars_from_table(&summary.by_weather_condition, |w| {
                        w.label().to_string()
                    }),
                );
                ui.add_space(SECTION_SPACING);
            });
    }

    fn section_title(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(18.0).strong());
        ui.separator();
        ui.add_space(5.0);
    }

    /// Casual, registered and total metric cards side by side.
    fn draw_metrics(ui: &mut egui::Ui, totals: &RentalTotals) {
        let metrics = [
            ("Casual User", totals.casual),
            ("Registered User", totals.registered),
            ("Total User", totals.total),
        ];

        ui.columns(metrics.len(), |columns| {
            for (ui, (label, value)) in columns.iter_mut().zip(metrics) {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                        ui.label(RichText::new(format_count(value)).size(28.0).strong());
                    });
            }
        });
    }
}
