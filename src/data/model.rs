use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the types spreadsheet files carry.
/// Used as grouping keys downstream, so `CellValue` must be `Ord` + `Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can group by CellValue in ordered maps --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for quantity statistics.
    /// Strings are never coerced, even when they look numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Dataset – one sheet's tabular content
// ---------------------------------------------------------------------------

/// One sheet after loading: ordered header plus rows of cells.
/// Immutable after load; every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column names in the source sheet's display order.
    pub columns: Vec<String>,
    /// Data rows, each parallel to `columns`.
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, padding or truncating every row to the header width.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, CellValue::Null);
        }
        Dataset { columns, rows }
    }

    /// Position of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a CellValue> {
        let idx = self.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SheetCollection – the complete loaded file
// ---------------------------------------------------------------------------

/// One named sheet of a loaded file.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub data: Dataset,
}

/// All sheets of one loaded file, in workbook order.
/// Replaced wholesale when a new file is loaded.
#[derive(Debug, Clone)]
pub struct SheetCollection {
    /// File name of the source, for display.
    pub file_name: String,
    pub sheets: Vec<Sheet>,
}

impl SheetCollection {
    /// Look up a sheet by name.
    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.data)
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_f64_accepts_only_numeric_variants() {
        assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(CellValue::String("2.5".into()).as_f64(), None);
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec![CellValue::Integer(1)],
                vec![
                    CellValue::Integer(1),
                    CellValue::Integer(2),
                    CellValue::Integer(3),
                    CellValue::Integer(4),
                ],
            ],
        );
        assert!(ds.rows.iter().all(|r| r.len() == 3));
        assert_eq!(ds.rows[0][2], CellValue::Null);
    }

    #[test]
    fn column_values_follows_display_order() {
        let ds = Dataset::new(
            vec!["sede".into(), "cantidad".into()],
            vec![
                vec![CellValue::String("A".into()), CellValue::Integer(10)],
                vec![CellValue::String("B".into()), CellValue::Integer(5)],
            ],
        );
        let vals: Vec<_> = ds.column_values("cantidad").collect();
        assert_eq!(vals, vec![&CellValue::Integer(10), &CellValue::Integer(5)]);
        assert_eq!(ds.column_values("missing").count(), 0);
    }
}
