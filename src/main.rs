#![allow(dead_code)]

mod app;
mod data;
mod gui;
mod log;
mod pipeline;

use std::path::PathBuf;

use app::InspectorApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    ::log::info!(
        "Starting Red Channel Inspector v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Optional image path to open at startup
    let initial_path = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 560.0])
            .with_title("Red Channel Inspector")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Red Channel Inspector",
        options,
        Box::new(|cc| Ok(Box::new(InspectorApp::new(cc, initial_path)))),
    )
}
