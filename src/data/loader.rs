use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use thiserror::Error;

use super::model::{CellValue, Dataset, Sheet, SheetCollection};

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Ingestion failures. Always recovered at the UI boundary: the current
/// session keeps whatever was loaded before and the message is shown to the
/// user.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("could not parse delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an inventory file. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – every sheet is loaded
/// * `.csv` / `.txt` / `.tsv` – one implicit sheet named after the file stem
pub fn load_file(path: &Path) -> Result<SheetCollection, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path),
        "csv" | "txt" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// Read every sheet of a workbook. The first row of each sheet is the
/// header; blank header cells get positional names so the column set stays
/// addressable.
fn load_workbook(path: &Path) -> Result<SheetCollection, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let mut rows = range.rows();

        let columns: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(i, cell)| header_name(cell, i))
                .collect(),
            None => Vec::new(),
        };

        let data_rows: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        sheets.push(Sheet {
            name,
            data: Dataset::new(columns, data_rows),
        });
    }

    Ok(SheetCollection {
        file_name: display_name(path),
        sheets,
    })
}

fn header_name(cell: &Data, index: usize) -> String {
    match cell {
        Data::Empty => format!("Columna {}", index + 1),
        other => other.to_string(),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates, durations and cell errors are kept as display text.
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Delimited-text loader
// ---------------------------------------------------------------------------

/// Delimited text becomes a collection with a single implicit sheet. Field
/// types are guessed per cell (int → float → bool → string; empty → null).
fn load_delimited(path: &Path, delimiter: u8) -> Result<SheetCollection, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    let sheet_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("datos")
        .to_string();

    Ok(SheetCollection {
        file_name: display_name(path),
        sheets: vec![Sheet {
            name: sheet_name,
            data: Dataset::new(columns, rows),
        }],
    })
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("archivo")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rusty-stock-{}-{name}", std::process::id()))
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = temp_path(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_loads_as_a_single_implicit_sheet() {
        let path = write_temp(
            "inventario.csv",
            "Sede,Producto,Cantidad\nNorte,Tornillo,10\nSur,Tuerca,5\n",
        );
        let collection = load_file(&path).unwrap();

        assert_eq!(collection.sheets.len(), 1);
        let ds = &collection.sheets[0].data;
        assert_eq!(ds.columns, vec!["Sede", "Producto", "Cantidad"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0][2], CellValue::Integer(10));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn csv_cell_types_are_guessed() {
        let path = write_temp(
            "tipos.csv",
            "a,b,c,d,e\n1,2.5,true,texto,\n",
        );
        let collection = load_file(&path).unwrap();
        let row = &collection.sheets[0].data.rows[0];

        assert_eq!(row[0], CellValue::Integer(1));
        assert_eq!(row[1], CellValue::Float(2.5));
        assert_eq!(row[2], CellValue::Bool(true));
        assert_eq!(row[3], CellValue::String("texto".into()));
        assert_eq!(row[4], CellValue::Null);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let path = write_temp("datos.tsv", "sede\tcantidad\nA\t3\n");
        let ds = load_file(&path).unwrap().sheets.remove(0).data;
        assert_eq!(ds.columns, vec!["sede", "cantidad"]);
        assert_eq!(ds.rows[0][1], CellValue::Integer(3));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn txt_loads_as_comma_delimited_text() {
        let path = write_temp("inventario.txt", "sede,cantidad\nNorte,7\n");
        let ds = load_file(&path).unwrap().sheets.remove(0).data;
        assert_eq!(ds.columns, vec!["sede", "cantidad"]);
        assert_eq!(ds.rows[0][1], CellValue::Integer(7));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn blank_workbook_header_cells_get_positional_names() {
        assert_eq!(header_name(&Data::Empty, 0), "Columna 1");
        assert_eq!(header_name(&Data::Empty, 2), "Columna 3");
        assert_eq!(header_name(&Data::String("Sede".into()), 0), "Sede");
        assert_eq!(header_name(&Data::Int(7), 1), "7");
    }

    #[test]
    fn sample_format_resolves_all_four_roles() {
        let path = write_temp(
            "ejemplo.csv",
            "Sede,Producto,Cantidad,Precio_Unitario,Fecha_Entrada\n\
             Sede Norte,Tornillo M8,900,0.15,2025-01-15\n",
        );
        let collection = load_file(&path).unwrap();
        let mapping = crate::data::resolver::resolve_dataset(&collection.sheets[0].data);
        assert_eq!(mapping.resolved_count(), 4);
        assert_eq!(mapping.unit_price.as_deref(), Some("Precio_Unitario"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let path = write_temp("datos.pdf", "not a spreadsheet");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "pdf"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn corrupt_workbook_yields_load_error_not_panic() {
        let path = write_temp("roto.xlsx", "definitely not a zip archive");
        assert!(load_file(&path).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_yields_load_error() {
        let path = temp_path("no-existe.csv");
        assert!(load_file(&path).is_err());
    }
}
