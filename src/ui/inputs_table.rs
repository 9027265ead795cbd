use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::AlignedRecord;

/// Table of the columns one model received, in its schema order.
pub fn aligned_table(ui: &mut Ui, record: &AlignedRecord) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Feature");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (name, value) in record.columns() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(name);
                    });
                    row.col(|ui| {
                        ui.monospace(value.to_string());
                    });
                });
            }
        });
}
