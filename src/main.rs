mod app;
mod bundle;
mod color;
mod config;
mod data;
mod form;
mod model;
mod state;
mod ui;

use std::process::ExitCode;
use std::sync::Arc;

use app::PitchForecastApp;
use bundle::ModelBundle;
use config::ArtifactPaths;
use eframe::egui;

fn main() -> ExitCode {
    env_logger::init();

    // All four models must load before any window is created.
    let bundle = match ModelBundle::load(&ArtifactPaths::default()) {
        Ok(bundle) => Arc::new(bundle),
        Err(e) => {
            log::error!("Failed to load model artifacts: {e:#}");
            eprintln!("error: failed to load model artifacts: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 640.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Strikeout & Walk Prediction Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(PitchForecastApp::new(bundle)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("UI terminated with an error: {e}");
            ExitCode::FAILURE
        }
    }
}
