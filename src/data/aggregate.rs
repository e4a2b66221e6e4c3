use std::collections::BTreeMap;

use super::model::Dataset;
use super::resolver::ColumnMapping;

// ---------------------------------------------------------------------------
// Aggregate outputs
// ---------------------------------------------------------------------------

/// Sum / mean / max / min of the quantity column.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityStats {
    pub sum: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// One entry of the product frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCount {
    pub product: String,
    pub count: usize,
}

/// Per-location quantity summary (one row per distinct location).
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRow {
    pub location: String,
    pub total: f64,
    pub mean: f64,
    pub count: usize,
}

/// The location comparison table plus the extreme rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationComparison {
    /// Rows sorted by location label.
    pub rows: Vec<LocationRow>,
    /// Index into `rows` of the location with the largest total.
    pub top: usize,
    /// Index into `rows` of the location with the smallest total.
    pub bottom: usize,
}

impl LocationComparison {
    pub fn top_row(&self) -> &LocationRow {
        &self.rows[self.top]
    }

    pub fn bottom_row(&self) -> &LocationRow {
        &self.rows[self.bottom]
    }

    /// Combined stock across every location.
    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(|r| r.total).sum()
    }
}

/// One bin of the stock distribution histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Everything the dashboard derives from one dataset. Each panel is
/// independently optional: a role that did not resolve, or a quantity column
/// that is not numeric, silently disables the panels it feeds.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub record_count: usize,
    pub column_count: usize,
    /// Records per distinct location, in first-appearance order.
    pub location_counts: Option<Vec<(String, usize)>>,
    /// Top products by occurrence count, descending, at most `TOP_PRODUCTS`.
    pub top_products: Option<Vec<ProductCount>>,
    pub quantity: Option<QuantityStats>,
    /// Stock distribution over `HISTOGRAM_BINS` equal-width bins.
    pub histogram: Option<Vec<HistogramBin>>,
    pub comparison: Option<LocationComparison>,
}

impl Analysis {
    /// Number of distinct locations, when the location column resolved.
    pub fn location_count(&self) -> Option<usize> {
        self.location_counts.as_ref().map(|c| c.len())
    }
}

/// Ranking length of the product panel.
pub const TOP_PRODUCTS: usize = 10;

/// Bin count of the stock histogram.
pub const HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// Analysis entry-point
// ---------------------------------------------------------------------------

/// Compute every derivable panel for one dataset. Never fails: panels whose
/// inputs are missing or mistyped are left as `None`.
pub fn analyze(dataset: &Dataset, mapping: &ColumnMapping) -> Analysis {
    let location_counts = mapping
        .location
        .as_deref()
        .map(|col| value_counts(dataset, col));

    let top_products = mapping.product.as_deref().map(|col| {
        let mut counts = value_counts(dataset, col);
        // Stable sort keeps first-appearance order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(TOP_PRODUCTS);
        counts
            .into_iter()
            .map(|(product, count)| ProductCount { product, count })
            .collect()
    });

    let quantity = mapping
        .quantity
        .as_deref()
        .and_then(|col| quantity_stats(dataset, col));

    let histogram = mapping.quantity.as_deref().and_then(|col| {
        // Shown only when the stats ran, i.e. the column is numeric.
        quantity.as_ref()?;
        histogram(&numeric_values(dataset, col), HISTOGRAM_BINS)
    });

    let comparison = match (mapping.location.as_deref(), mapping.quantity.as_deref()) {
        (Some(loc), Some(qty)) => location_comparison(dataset, loc, qty),
        _ => None,
    };

    Analysis {
        record_count: dataset.len(),
        column_count: dataset.columns.len(),
        location_counts,
        top_products,
        quantity,
        histogram,
        comparison,
    }
}

// ---------------------------------------------------------------------------
// Individual computations
// ---------------------------------------------------------------------------

/// Occurrences per distinct non-null value, in first-appearance order.
fn value_counts(dataset: &Dataset, column: &str) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for value in dataset.column_values(column) {
        if value.is_null() {
            continue;
        }
        let label = value.to_string();
        if !counts.contains_key(&label) {
            order.push(label.clone());
        }
        *counts.entry(label).or_insert(0) += 1;
    }

    order
        .into_iter()
        .map(|label| {
            let n = counts[&label];
            (label, n)
        })
        .collect()
}

/// Numeric cells of a column. Nulls are dropped; anything else is kept as-is
/// so the caller can detect mistyped columns.
fn numeric_values(dataset: &Dataset, column: &str) -> Vec<f64> {
    dataset
        .column_values(column)
        .filter_map(|v| v.as_f64())
        .collect()
}

/// Whether every non-null cell of the column is numeric. A single stray
/// string disqualifies the whole column, matching the no-coercion rule.
fn column_is_numeric(dataset: &Dataset, column: &str) -> bool {
    dataset
        .column_values(column)
        .all(|v| v.is_null() || v.as_f64().is_some())
}

/// Stats over a numeric quantity column. `None` when the column holds any
/// non-numeric value or no numeric values at all.
fn quantity_stats(dataset: &Dataset, column: &str) -> Option<QuantityStats> {
    if !column_is_numeric(dataset, column) {
        return None;
    }
    let values = numeric_values(dataset, column);
    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().sum();
    let mean = sum / values.len() as f64;
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);

    Some(QuantityStats { sum, mean, max, min })
}

/// Equal-width histogram over `bins` buckets; the last bucket is closed on
/// both ends so the maximum lands inside it.
fn histogram(values: &[f64], bins: usize) -> Option<Vec<HistogramBin>> {
    if values.is_empty() || bins == 0 {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Degenerate range: every value identical, one bin holds everything.
    if (max - min).abs() < f64::EPSILON {
        return Some(vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }]);
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count,
            })
            .collect(),
    )
}

/// Group numeric quantities by location. Rows come out sorted by location
/// label; the extremes keep the first row on ties.
fn location_comparison(
    dataset: &Dataset,
    location_col: &str,
    quantity_col: &str,
) -> Option<LocationComparison> {
    let loc_idx = dataset.column_index(location_col)?;
    let qty_idx = dataset.column_index(quantity_col)?;

    // location label → (sum, count); BTreeMap gives the sorted row order.
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for row in &dataset.rows {
        let location = &row[loc_idx];
        if location.is_null() {
            continue;
        }
        let Some(qty) = row[qty_idx].as_f64() else {
            continue;
        };
        let entry = groups.entry(location.to_string()).or_insert((0.0, 0));
        entry.0 += qty;
        entry.1 += 1;
    }

    if groups.is_empty() {
        return None;
    }

    let rows: Vec<LocationRow> = groups
        .into_iter()
        .map(|(location, (total, count))| LocationRow {
            location,
            total,
            mean: total / count as f64,
            count,
        })
        .collect();

    let mut top = 0;
    let mut bottom = 0;
    for (i, row) in rows.iter().enumerate() {
        if row.total > rows[top].total {
            top = i;
        }
        if row.total < rows[bottom].total {
            bottom = i;
        }
    }

    Some(LocationComparison { rows, top, bottom })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue as V;
    use crate::data::resolver::resolve_dataset;

    fn inventory(rows: Vec<Vec<V>>) -> Dataset {
        Dataset::new(vec!["sede".into(), "cantidad".into()], rows)
    }

    fn str_cell(s: &str) -> V {
        V::String(s.into())
    }

    #[test]
    fn per_location_table_sums_means_and_counts() {
        let ds = inventory(vec![
            vec![str_cell("A"), V::Integer(10)],
            vec![str_cell("A"), V::Integer(20)],
            vec![str_cell("B"), V::Integer(5)],
        ]);
        let mapping = resolve_dataset(&ds);
        let analysis = analyze(&ds, &mapping);

        let cmp = analysis.comparison.expect("comparison should run");
        assert_eq!(cmp.rows.len(), 2);

        let a = &cmp.rows[0];
        assert_eq!(a.location, "A");
        assert_eq!(a.total, 30.0);
        assert_eq!(a.mean, 15.0);
        assert_eq!(a.count, 2);

        let b = &cmp.rows[1];
        assert_eq!(b.location, "B");
        assert_eq!(b.total, 5.0);
        assert_eq!(b.mean, 5.0);
        assert_eq!(b.count, 1);

        assert_eq!(cmp.top_row().location, "A");
        assert_eq!(cmp.bottom_row().location, "B");
        assert_eq!(cmp.grand_total(), 35.0);
    }

    #[test]
    fn extreme_ties_keep_the_first_row() {
        let ds = inventory(vec![
            vec![str_cell("A"), V::Integer(10)],
            vec![str_cell("B"), V::Integer(10)],
        ]);
        let mapping = resolve_dataset(&ds);
        let cmp = analyze(&ds, &mapping).comparison.unwrap();
        assert_eq!(cmp.top_row().location, "A");
        assert_eq!(cmp.bottom_row().location, "A");
    }

    #[test]
    fn non_numeric_quantity_skips_stats_and_histogram() {
        let ds = inventory(vec![
            vec![str_cell("A"), str_cell("diez")],
            vec![str_cell("B"), str_cell("cinco")],
        ]);
        let mapping = resolve_dataset(&ds);
        let analysis = analyze(&ds, &mapping);
        assert!(analysis.quantity.is_none());
        assert!(analysis.histogram.is_none());
        // Location panel still runs.
        assert_eq!(analysis.location_count(), Some(2));
    }

    #[test]
    fn a_single_stray_string_disqualifies_the_quantity_column() {
        let ds = inventory(vec![
            vec![str_cell("A"), V::Integer(10)],
            vec![str_cell("B"), str_cell("n/a")],
        ]);
        let mapping = resolve_dataset(&ds);
        assert!(analyze(&ds, &mapping).quantity.is_none());
    }

    #[test]
    fn nulls_are_ignored_by_quantity_stats() {
        let ds = inventory(vec![
            vec![str_cell("A"), V::Integer(10)],
            vec![str_cell("A"), V::Null],
            vec![str_cell("B"), V::Float(2.0)],
        ]);
        let mapping = resolve_dataset(&ds);
        let stats = analyze(&ds, &mapping).quantity.unwrap();
        assert_eq!(stats.sum, 12.0);
        assert_eq!(stats.mean, 6.0);
        assert_eq!(stats.max, 10.0);
        assert_eq!(stats.min, 2.0);
    }

    #[test]
    fn missing_roles_skip_panels_without_error() {
        let ds = Dataset::new(
            vec!["id".into(), "fecha".into()],
            vec![vec![V::Integer(1), str_cell("2025-01-01")]],
        );
        let mapping = resolve_dataset(&ds);
        let analysis = analyze(&ds, &mapping);
        assert!(analysis.location_counts.is_none());
        assert!(analysis.top_products.is_none());
        assert!(analysis.quantity.is_none());
        assert!(analysis.comparison.is_none());
        assert_eq!(analysis.record_count, 1);
        assert_eq!(analysis.column_count, 2);
    }

    #[test]
    fn product_ranking_is_descending_and_truncated() {
        let mut rows = Vec::new();
        for i in 0..12 {
            let name = format!("prod_{i:02}");
            for _ in 0..=i {
                rows.push(vec![V::String(name.clone())]);
            }
        }
        let ds = Dataset::new(vec!["producto".into()], rows);
        let mapping = resolve_dataset(&ds);
        let ranking = analyze(&ds, &mapping).top_products.unwrap();

        assert_eq!(ranking.len(), TOP_PRODUCTS);
        assert_eq!(ranking[0].product, "prod_11");
        assert_eq!(ranking[0].count, 12);
        assert!(ranking.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn product_ranking_ties_follow_first_appearance() {
        let rows = vec![
            vec![str_cell("tornillo")],
            vec![str_cell("tuerca")],
            vec![str_cell("tuerca")],
            vec![str_cell("arandela")],
        ];
        let ds = Dataset::new(vec!["producto".into()], rows);
        let mapping = resolve_dataset(&ds);
        let ranking = analyze(&ds, &mapping).top_products.unwrap();
        assert_eq!(ranking[0].product, "tuerca");
        assert_eq!(ranking[1].product, "tornillo");
        assert_eq!(ranking[2].product, "arandela");
    }

    #[test]
    fn histogram_covers_the_full_range() {
        let ds = inventory(
            (0..60)
                .map(|i| vec![str_cell("A"), V::Integer(i)])
                .collect(),
        );
        let mapping = resolve_dataset(&ds);
        let bins = analyze(&ds, &mapping).histogram.unwrap();
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 60);
        assert_eq!(bins.first().unwrap().start, 0.0);
        assert!((bins.last().unwrap().end - 59.0).abs() < 1e-9);
    }

    #[test]
    fn identical_quantities_collapse_to_one_bin() {
        let ds = inventory(vec![
            vec![str_cell("A"), V::Integer(7)],
            vec![str_cell("B"), V::Integer(7)],
        ]);
        let mapping = resolve_dataset(&ds);
        let bins = analyze(&ds, &mapping).histogram.unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
    }
}
