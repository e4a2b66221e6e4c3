use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::HistogramBin;

/// Fallback bar colour when no per-location colour map applies.
const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);

// ---------------------------------------------------------------------------
// Categorical bar chart
// ---------------------------------------------------------------------------

/// Bar chart with one bar per category label. Bars sit at integer x
/// positions; the axis formatter maps them back to their labels.
pub fn category_bars(
    ui: &mut Ui,
    id: &str,
    entries: &[(String, f64)],
    colors: Option<&ColorMap>,
) {
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let color = colors
                .map(|cm| cm.color_for(label))
                .unwrap_or(ACCENT);
            Bar::new(i as f64, *value)
                .name(label)
                .width(0.6)
                .fill(color)
        })
        .collect();

    let labels: Vec<String> = entries.iter().map(|(l, _)| l.clone()).collect();

    Plot::new(id.to_string())
        .height(260.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels
                .get(idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Stock histogram
// ---------------------------------------------------------------------------

/// Distribution of the quantity column over equal-width bins.
pub fn stock_histogram(ui: &mut Ui, id: &str, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            let center = (bin.start + bin.end) / 2.0;
            let width = (bin.end - bin.start).max(f64::EPSILON);
            Bar::new(center, bin.count as f64)
                .width(width)
                .fill(Color32::from_rgb(245, 158, 11))
        })
        .collect();

    Plot::new(id.to_string())
        .height(260.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Per-location line chart
// ---------------------------------------------------------------------------

/// Line with markers, one point per location (used for the average-stock
/// comparison).
pub fn category_line(ui: &mut Ui, id: &str, entries: &[(String, f64)]) {
    let points: Vec<[f64; 2]> = entries
        .iter()
        .enumerate()
        .map(|(i, (_, v))| [i as f64, *v])
        .collect();

    let labels: Vec<String> = entries.iter().map(|(l, _)| l.clone()).collect();

    Plot::new(id.to_string())
        .height(260.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels
                .get(idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(points.clone()))
                .color(ACCENT)
                .width(1.5);
            plot_ui.line(line);
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(ACCENT)
                    .radius(3.5),
            );
        });
}
