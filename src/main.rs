mod app;
mod color;
mod config;
mod data;
mod error;
mod report;
mod state;
mod stats;
#[cfg(test)]
mod testing;
mod ui;

use app::BellCurveApp;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::from_env();
    log::info!(
        "Starting with source {} and a {}s refresh interval",
        config.source,
        config.refresh_interval_secs
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NetMargin – Dynamic Bell Curve",
        options,
        Box::new(|_cc| Ok(Box::new(BellCurveApp::new(config)))),
    )
}
