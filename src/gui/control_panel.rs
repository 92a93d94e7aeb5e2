//! Control Panel Widget
//! Left side panel with the data source, date range selection and export.

use crate::charts::format_count;
use crate::data::DateRange;
use chrono::{Days, NaiveDate};
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel with file selection and the date range filter.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub row_count: usize,
    /// Dataset `[min_date, max_date]`, `None` until a file is loaded.
    pub bounds: Option<DateRange>,
    /// Selected start and end as day offsets from `bounds.start`.
    pub start_offset: u64,
    pub end_offset: u64,
    pub status: String,
    pub is_busy: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            row_count: 0,
            bounds: None,
            start_offset: 0,
            end_offset: 0,
            status: "Ready".to_string(),
            is_busy: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the selection to the full range of a freshly loaded dataset.
    pub fn set_dataset(&mut self, path: PathBuf, row_count: usize, bounds: Option<DateRange>) {
        self.csv_path = Some(path);
        self.row_count = row_count;
        self.bounds = bounds;
        self.reset_range();
    }

    pub fn reset_range(&mut self) {
        self.start_offset = 0;
        self.end_offset = self.span_days();
    }

    fn span_days(&self) -> u64 {
        self.bounds
            .map(|b| (b.end - b.start).num_days().max(0) as u64)
            .unwrap_or(0)
    }

    fn offset_date(&self, offset: u64) -> Option<NaiveDate> {
        self.bounds
            .and_then(|b| b.start.checked_add_days(Days::new(offset)))
    }

    /// Currently selected range, clamped to the dataset bounds.
    pub fn selected_range(&self) -> Option<DateRange> {
        let bounds = self.bounds?;
        let start = self.offset_date(self.start_offset)?;
        let end = self.offset_date(self.end_offset)?;
        Some(DateRange::new(start, end).clamp(bounds.start, bounds.end))
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚲 Bike Rental Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_busy, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });

                if self.row_count > 0 {
                    ui.label(
                        RichText::new(format!("{} days loaded", format_count(self.row_count as u64)))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(8.0);

        if self.bounds.is_some() {
            let span = self.span_days();
            let label_width = 50.0;

            let start_changed = ui
                .horizontal(|ui| {
                    ui.add_sized([label_width, 20.0], egui::Label::new("Start:"));
                    let changed = ui
                        .add(egui::Slider::new(&mut self.start_offset, 0..=span).show_value(false))
                        .changed();
                    if let Some(d) = self.offset_date(self.start_offset) {
                        ui.label(d.format("%Y-%m-%d").to_string());
                    }
                    changed
                })
                .inner;

            let end_changed = ui
                .horizontal(|ui| {
                    ui.add_sized([label_width, 20.0], egui::Label::new("End:"));
                    let changed = ui
                        .add(egui::Slider::new(&mut self.end_offset, 0..=span).show_value(false))
                        .changed();
                    if let Some(d) = self.offset_date(self.end_offset) {
                        ui.label(d.format("%Y-%m-%d").to_string());
                    }
                    changed
                })
                .inner;

            // Keep start <= end, moving the end the user did not touch.
            if start_changed && self.start_offset > self.end_offset {
                self.end_offset = self.start_offset;
            }
            if end_changed && self.end_offset < self.start_offset {
                self.start_offset = self.end_offset;
            }
            if start_changed || end_changed {
                action = ControlPanelAction::RangeChanged;
            }

            ui.add_space(5.0);
            ui.vertical_centered(|ui| {
                if ui.small_button("Reset to full range").clicked() {
                    self.reset_range();
                    action = ControlPanelAction::RangeChanged;
                }
            });
        } else {
            ui.label(RichText::new("Load a dataset to pick a range").color(Color32::GRAY));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.bounds.is_some() && !self.is_busy, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export JSON").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportJson;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        if self.is_busy {
            ui.add(egui::Spinner::new());
        }

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") || self.status.contains("exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    RangeChanged,
    ExportJson,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn loaded_panel() -> ControlPanel {
        let mut panel = ControlPanel::new();
        panel.set_dataset(
            PathBuf::from("day.csv"),
            731,
            Some(DateRange::new(date("2011-01-01"), date("2012-12-31"))),
        );
        panel
    }

    #[test]
    fn test_selection_defaults_to_full_range() {
        let panel = loaded_panel();
        let range = panel.selected_range().unwrap();

        assert_eq!(range.start, date("2011-01-01"));
        assert_eq!(range.end, date("2012-12-31"));
        assert_eq!(range.days(), 731);
    }

    #[test]
    fn test_offsets_map_to_dates() {
        let mut panel = loaded_panel();
        panel.start_offset = 31;
        panel.end_offset = 58;
        let range = panel.selected_range().unwrap();

        assert_eq!(range.start, date("2011-02-01"));
        assert_eq!(range.end, date("2011-02-28"));
    }

    #[test]
    fn test_offsets_beyond_bounds_are_clamped() {
        let mut panel = loaded_panel();
        panel.end_offset = 10_000;
        assert_eq!(panel.selected_range().unwrap().end, date("2012-12-31"));
    }

    #[test]
    fn test_no_range_before_load() {
        assert!(ControlPanel::new().selected_range().is_none());
    }
}
