//! Bike Rental Dashboard - Daily Rental Aggregation & Interactive Charts
//!
//! Loads a daily bike-rental CSV, aggregates rentals by date, season, month,
//! weekday, working day, holiday and weather, and shows the results in an
//! interactive window.

mod charts;
mod data;
mod gui;
mod report;
mod stats;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bike_rental_dashboard")]
#[command(about = "Interactive dashboard for daily bike rental data", long_about = None)]
struct Cli {
    /// CSV file to load at startup
    #[arg(short, long, env = "BIKE_DASHBOARD_DATA", value_name = "CSV")]
    data: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Bike Rental Dashboard"),
        ..Default::default()
    };

    // Run the application
    let data_path = cli.data;
    eframe::run_native(
        "Bike Rental Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, data_path)))),
    )
    .map_err(|e| anyhow!("failed to start dashboard window: {e}"))
}
