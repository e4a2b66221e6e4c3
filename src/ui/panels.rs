use anyhow::Context;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::export::{dataset_to_csv, EXPORT_FILE_NAME};
use crate::data::resolver::Role;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_data = state.current_dataset().is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Exportar CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(workbook) = &state.workbook {
            let records = state
                .analysis
                .as_ref()
                .map(|a| a.record_count)
                .unwrap_or_default();
            ui.label(format!(
                "{} – {} hojas, {} registros en la hoja actual",
                workbook.file_name,
                workbook.sheets.len(),
                records
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – sheet selection and summary
// ---------------------------------------------------------------------------

/// Render the left panel: sheet selector, resolved columns, quick metrics.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📦 Inventario");
    ui.separator();

    let Some(workbook) = &state.workbook else {
        instructions(ui);
        return;
    };

    // Clone what we need so we can mutate state inside the combo closure.
    let sheet_names: Vec<String> = workbook
        .sheets
        .iter()
        .map(|s| s.name.clone())
        .collect();
    let selected = state.selected_sheet.clone().unwrap_or_default();

    ui.strong("Hoja a analizar");
    egui::ComboBox::from_id_salt("sheet_select")
        .selected_text(&selected)
        .show_ui(ui, |ui: &mut Ui| {
            for name in &sheet_names {
                if ui.selectable_label(selected == *name, name).clicked() {
                    state.select_sheet(name.clone());
                }
            }
        });

    ui.separator();

    if let Some(analysis) = &state.analysis {
        ui.label(format!("Registros: {}", analysis.record_count));
        ui.label(format!("Columnas: {}", analysis.column_count));
        if let Some(n) = analysis.location_count() {
            ui.label(format!("Sedes: {n}"));
        }
    }

    ui.separator();
    ui.strong("Columnas detectadas");
    for role in Role::ALL {
        let detected = state.mapping.get(role).unwrap_or("—");
        ui.label(format!("{role}: {detected}"));
    }

    ui.separator();
    ui.checkbox(&mut state.show_preview, "Vista previa de datos");
    ui.checkbox(&mut state.show_all_rows, "Ver todos los datos");
}

fn instructions(ui: &mut Ui) {
    ui.label("Carga un archivo Excel o CSV con datos de inventario.");
    ui.add_space(8.0);
    ui.strong("Columnas esperadas:");
    ui.label("• Sede – nombre de la ubicación");
    ui.label("• Producto – nombre del producto");
    ui.label("• Cantidad – stock disponible");
    ui.label("• Precio_Unitario – precio de cada unidad");
    ui.add_space(8.0);
    ui.label("💡 Las columnas con nombres similares se detectan automáticamente.");
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir archivo de inventario")
        .add_filter(
            "Archivos soportados",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "txt", "tsv"],
        )
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("Texto delimitado", &["csv", "txt", "tsv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(workbook) => {
                log::info!(
                    "Loaded {} with {} sheet(s)",
                    workbook.file_name,
                    workbook.sheets.len()
                );
                state.set_workbook(workbook);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error al cargar el archivo: {e}"));
            }
        }
    }
}

/// Export the currently displayed table through a save dialog.
pub fn export_dialog(state: &mut AppState) {
    let Some(dataset) = state.current_dataset() else {
        return;
    };

    let target = rfd::FileDialog::new()
        .set_title("Descargar datos en CSV")
        .set_file_name(EXPORT_FILE_NAME)
        .save_file();

    let Some(path) = target else {
        return;
    };

    let result = dataset_to_csv(dataset).and_then(|csv_text| {
        std::fs::write(&path, csv_text)
            .with_context(|| format!("writing {}", path.display()))
    });

    match result {
        Ok(()) => {
            log::info!("Exported current sheet to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error al exportar: {e:#}"));
        }
    }
}
