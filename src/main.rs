mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod state;
mod ui;

use app::RemotePulseApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    let config = Config::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    // Load once up front; a failure leaves the UI empty with the error shown.
    let mut state = AppState::with_region(config.region.clone());
    if !state.load_path(&config.data) {
        log::warn!("Starting without data; use File → Open to pick a survey file");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Remote Pulse – Remote Work & Mental Health",
        options,
        Box::new(|_cc| Ok(Box::new(RemotePulseApp::new(state)))),
    )
}
