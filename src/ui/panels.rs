use eframe::egui::{self, Color32, DragValue, RichText, Ui};

use crate::bundle::PredictionResult;
use crate::color::probability_color;
use crate::config::{STRIKEOUT_THRESHOLD, WALK_THRESHOLD};
use crate::form::{DAYS_REST_RANGE, START_DEPTH_RANGE, TEAM_ID_RANGE};
use crate::state::AppState;
use crate::ui::format::{format_expected, format_probability};
use crate::ui::inputs_table;

// ---------------------------------------------------------------------------
// Left side panel – game inputs
// ---------------------------------------------------------------------------

/// Render the input form. Nothing is predicted until the button is pressed.
pub fn input_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📥 Enter Game Metrics");
    ui.separator();

    let inputs = &mut state.inputs;
    egui::Grid::new("game_inputs")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Days Rest (DR):");
            ui.add(DragValue::new(&mut inputs.days_rest).range(DAYS_REST_RANGE));
            ui.end_row();

            ui.label("Start Depth (GS-#):");
            ui.add(
                DragValue::new(&mut inputs.start_depth)
                    .range(START_DEPTH_RANGE)
                    .speed(0.1)
                    .fixed_decimals(2),
            );
            ui.end_row();

            ui.label("Team ID (0–29):");
            ui.add(DragValue::new(&mut inputs.team_id).range(TEAM_ID_RANGE));
            ui.end_row();

            ui.label("Opponent ID (0–29):");
            ui.add(DragValue::new(&mut inputs.opp_id).range(TEAM_ID_RANGE));
            ui.end_row();

            ui.label("Rolling Strikeouts (Last 5):");
            ui.add(DragValue::new(&mut inputs.rolling_so).speed(0.1).fixed_decimals(2));
            ui.end_row();

            ui.label("Rolling Walks (Last 5):");
            ui.add(DragValue::new(&mut inputs.rolling_bb).speed(0.1).fixed_decimals(2));
            ui.end_row();

            ui.label("Rolling Innings Pitched (Last 5):");
            ui.add(DragValue::new(&mut inputs.rolling_ip).speed(0.1).fixed_decimals(2));
            ui.end_row();

            ui.label("Pitcher ID:");
            ui.text_edit_singleline(&mut inputs.pitcher_id);
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("🧠 Predict All Models").clicked() {
            state.submit();
        }
        if ui.small_button("Reset").clicked() {
            state.reset_inputs();
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – results
// ---------------------------------------------------------------------------

/// Render the results of the last round, or the error that aborted it.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("⚾ Strikeout & Walk Prediction Dashboard");
    ui.label("Regression models predict exact counts; classification models give the probability of exceeding a threshold.");
    ui.separator();

    if let Some(msg) = &state.status_message {
        ui.label(RichText::new(msg).color(Color32::RED));
        return;
    }

    let Some(round) = &state.round else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Enter game metrics and press “Predict All Models”.");
        });
        return;
    };

    ui.heading("📊 Results");
    ui.columns(2, |columns: &mut [Ui]| {
        stat_panel(
            &mut columns[0],
            "🎯 Strikeouts",
            "SO",
            STRIKEOUT_THRESHOLD,
            &round.strikeouts,
        );
        stat_panel(
            &mut columns[1],
            "🎯 Walks (BB)",
            "BB",
            WALK_THRESHOLD,
            &round.walks,
        );
    });

    ui.add_space(12.0);
    egui::CollapsingHeader::new("Model inputs")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for (name, record) in &round.inputs {
                ui.push_id(*name, |ui: &mut Ui| {
                    ui.strong(*name);
                    inputs_table::aligned_table(ui, record);
                });
                ui.add_space(6.0);
            }
        });
}

fn stat_panel(ui: &mut Ui, title: &str, abbrev: &str, threshold: u32, result: &PredictionResult) {
    ui.group(|ui: &mut Ui| {
        ui.heading(title);
        metric(
            ui,
            &format!("Expected {abbrev}"),
            RichText::new(format_expected(result.expected)),
        );
        metric(
            ui,
            &format!("P({abbrev} > {threshold})"),
            RichText::new(format_probability(result.probability))
                .color(probability_color(result.probability)),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: RichText) {
    ui.label(RichText::new(label).small().weak());
    ui.label(value.size(28.0).strong());
    ui.add_space(4.0);
}
