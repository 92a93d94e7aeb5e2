//! Bike Rental Dashboard Main Application
//! Main window with control panel and dashboard charts.

use crate::data::{date_bounds, filter_by_date, DataLoader, RentalRecord};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::report::ReportExporter;
use crate::stats::RentalAggregator;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, error};

/// CSV loading result from background thread
enum LoadResult {
    Complete {
        path: PathBuf,
        records: Vec<RentalRecord>,
    },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    /// Normalized records of the loaded file, never mutated after load.
    records: Vec<RentalRecord>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: Option<PathBuf>) -> Self {
        let mut app = Self {
            records: Vec::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };

        if let Some(path) = data_path {
            app.start_loading(path);
        }
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Load and normalize a CSV file in a background thread.
    fn start_loading(&mut self, path: PathBuf) {
        self.control_panel
            .set_status(&format!("Loading {}...", path.display()));
        self.control_panel.is_busy = true;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DataLoader::load(&path) {
                Ok(records) => LoadResult::Complete { path, records },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { path, records }) => {
                let bounds = date_bounds(&records);
                self.control_panel
                    .set_dataset(path, records.len(), bounds);
                self.control_panel
                    .set_status(&format!("Loaded {} rows", records.len()));
                self.records = records;
                self.finish_loading();
                self.recompute();
            }
            Ok(LoadResult::Error(message)) => {
                error!(error = %message, "failed to load dataset");
                self.control_panel
                    .set_status(&format!("Error: {}", message));
                self.finish_loading();
            }
            Err(TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                error!("loader thread exited without a result");
                self.control_panel
                    .set_status("Error: loader stopped unexpectedly");
                self.finish_loading();
            }
        }
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.is_busy = false;
    }

    /// Filter the loaded records to the selected range and rebuild every table.
    fn recompute(&mut self) {
        let Some(range) = self.control_panel.selected_range() else {
            self.chart_viewer.clear();
            return;
        };

        let filtered = filter_by_date(&self.records, range);
        debug!(
            start = %range.start,
            end = %range.end,
            rows = filtered.len(),
            "recomputing summary"
        );
        self.chart_viewer
            .set_summary(RentalAggregator::summarize(&filtered, Some(range)));
    }

    /// Handle JSON export of the current summary
    fn handle_export_json(&mut self) {
        let Some(summary) = &self.chart_viewer.summary else {
            self.control_panel.set_status("Nothing to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("bike_rental_summary.json")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match ReportExporter::export_summary_json(summary, &output_path) {
            Ok(()) => {
                self.control_panel.set_status(&format!(
                    "Summary exported to {}",
                    output_path.display()
                ));
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::RangeChanged => self.recompute(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
