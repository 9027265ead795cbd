use std::sync::Arc;

use eframe::egui;

use crate::bundle::ModelBundle;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PitchForecastApp {
    pub state: AppState,
}

impl PitchForecastApp {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self {
            state: AppState::new(bundle),
        }
    }
}

impl eframe::App for PitchForecastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Left side panel: game inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::input_panel(ui, &mut self.state);
            });

        // ---- Central panel: results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                panels::results_panel(ui, &self.state);
            });
        });
    }
}
