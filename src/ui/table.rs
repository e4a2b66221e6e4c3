use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::LocationComparison;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

/// Render a dataset as a striped table, optionally limited to the first
/// `limit` rows (used by the preview).
pub fn dataset_table(ui: &mut Ui, id: &str, dataset: &Dataset, limit: Option<usize>) {
    if dataset.columns.is_empty() {
        ui.label("La hoja no contiene datos válidos");
        return;
    }

    let n_rows = limit.map_or(dataset.len(), |l| dataset.len().min(l));

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(Column::auto().at_least(60.0), dataset.columns.len())
            .header(20.0, |mut header| {
                for col in &dataset.columns {
                    header.col(|ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, n_rows, |mut row| {
                    let cells = &dataset.rows[row.index()];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Location comparison table
// ---------------------------------------------------------------------------

/// Per-location stock summary: total, average and record count.
pub fn comparison_table(ui: &mut Ui, comparison: &LocationComparison) {
    ui.push_id("comparison_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().at_least(100.0), 4)
            .header(20.0, |mut header| {
                for title in ["Sede", "Stock Total", "Stock Promedio", "Cantidad Productos"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, comparison.rows.len(), |mut row| {
                    let entry = &comparison.rows[row.index()];
                    row.col(|ui| {
                        ui.label(&entry.location);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", entry.total));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}", entry.mean));
                    });
                    row.col(|ui| {
                        ui.label(entry.count.to_string());
                    });
                });
            });
    });
}
