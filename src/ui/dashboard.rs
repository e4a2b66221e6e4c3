use eframe::egui::{RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// Central dashboard
// ---------------------------------------------------------------------------

/// Render the central panel: preview, per-location analysis, product
/// ranking, stock statistics, location comparison, full data.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if state.workbook.is_none() {
        welcome(ui);
        return;
    }

    let mut export_clicked = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            render_sections(ui, state, &mut export_clicked);
        });

    if export_clicked {
        panels::export_dialog(state);
    }
}

fn render_sections(ui: &mut Ui, state: &AppState, export_clicked: &mut bool) {
    let Some(dataset) = state.current_dataset() else {
        ui.label("La hoja no contiene datos válidos");
        return;
    };
    let Some(analysis) = state.analysis.as_ref() else {
        return;
    };

    if dataset.is_empty() {
        ui.label("La hoja no contiene datos válidos");
        return;
    }

    // ---- Data preview ----
    if state.show_preview {
        ui.heading("👁 Vista previa de datos");
        table::dataset_table(ui, "preview_table", dataset, Some(10));
        ui.label(format!("📊 Total de registros: {}", analysis.record_count));
        ui.separator();
    }

    // ---- Per-location analysis ----
    if let Some(counts) = &analysis.location_counts {
        ui.heading("📍 Análisis por Sede");
        ui.horizontal(|ui: &mut Ui| {
            metric(ui, "Total de Sedes", counts.len().to_string());
            metric(ui, "Total de Registros", analysis.record_count.to_string());
            metric(ui, "Columnas de Datos", analysis.column_count.to_string());
        });

        ui.label("📊 Cantidad de Productos por Sede");
        let entries: Vec<(String, f64)> = counts
            .iter()
            .map(|(label, n)| (label.clone(), *n as f64))
            .collect();
        charts::category_bars(
            ui,
            "records_per_location",
            &entries,
            state.location_colors.as_ref(),
        );
        ui.separator();
    }

    // ---- Product ranking ----
    if let Some(ranking) = &analysis.top_products {
        ui.heading("🛍 Análisis de Productos");
        ui.label("🏆 Top 10 Productos Más Comunes");
        let entries: Vec<(String, f64)> = ranking
            .iter()
            .map(|p| (p.product.clone(), p.count as f64))
            .collect();
        charts::category_bars(ui, "top_products", &entries, None);
        ui.separator();
    }

    // ---- Stock statistics ----
    if let Some(stats) = &analysis.quantity {
        ui.heading("📦 Análisis de Stock");
        ui.horizontal(|ui: &mut Ui| {
            metric(ui, "Stock Total", thousands(stats.sum));
            metric(ui, "Stock Promedio", thousands(stats.mean));
            metric(ui, "Stock Máximo", thousands(stats.max));
            metric(ui, "Stock Mínimo", thousands(stats.min));
        });

        if let Some(bins) = &analysis.histogram {
            ui.label("📈 Distribución de Stock");
            charts::stock_histogram(ui, "stock_histogram", bins);
        }
        ui.separator();
    }

    // ---- Location comparison ----
    if let Some(comparison) = &analysis.comparison {
        ui.heading("🏢 Comparativa de Sedes");

        ui.horizontal(|ui: &mut Ui| {
            let top = comparison.top_row();
            let bottom = comparison.bottom_row();
            card(
                ui,
                "📈 Sede con Más Stock",
                &top.location,
                &format!("Stock: {}", thousands(top.total)),
            );
            card(
                ui,
                "📉 Sede con Menos Stock",
                &bottom.location,
                &format!("Stock: {}", thousands(bottom.total)),
            );
            card(
                ui,
                "📊 Total de Sedes",
                &comparison.rows.len().to_string(),
                &format!("Stock Combinado: {}", thousands(comparison.grand_total())),
            );
        });

        table::comparison_table(ui, comparison);

        ui.label("📊 Stock Total por Sede");
        let totals: Vec<(String, f64)> = comparison
            .rows
            .iter()
            .map(|r| (r.location.clone(), r.total))
            .collect();
        charts::category_bars(
            ui,
            "stock_per_location",
            &totals,
            state.location_colors.as_ref(),
        );

        ui.label("📈 Stock Promedio por Sede");
        let means: Vec<(String, f64)> = comparison
            .rows
            .iter()
            .map(|r| (r.location.clone(), r.mean))
            .collect();
        charts::category_line(ui, "mean_stock_per_location", &means);
        ui.separator();
    }

    // ---- Full data ----
    if state.show_all_rows {
        ui.heading("📋 Datos Completos");
        table::dataset_table(ui, "full_table", dataset, None);
        if ui.button("⬇ Descargar datos en CSV").clicked() {
            *export_clicked = true;
        }
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

fn welcome(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Abre un archivo de inventario  (Archivo → Abrir…)");
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(value).heading());
            ui.small(label);
        });
    });
}

fn card(ui: &mut Ui, title: &str, headline: &str, detail: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.strong(title);
            ui.label(RichText::new(headline).heading());
            ui.small(detail);
        });
    });
}

/// Format a value with thousands separators and no decimals, matching the
/// metric cards of the dashboard.
fn thousands(v: f64) -> String {
    let rounded = v.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::thousands;

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1000.0), "1,000");
        assert_eq!(thousands(1234567.4), "1,234,567");
        assert_eq!(thousands(-42000.0), "-42,000");
    }
}
