use anyhow::{Context, Result};

use super::model::Dataset;

/// Default name offered by the save dialog.
pub const EXPORT_FILE_NAME: &str = "datos_inventario.csv";

/// Serialize a dataset to comma-separated text, header first. Cells render
/// through their `Display` form, so a re-load reproduces the same row count
/// and column set.
pub fn dataset_to_csv(dataset: &Dataset) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&dataset.columns)
        .context("writing csv header")?;

    for (i, row) in dataset.rows.iter().enumerate() {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .with_context(|| format!("writing csv row {i}"))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv output: {e}"))?;
    String::from_utf8(bytes).context("csv output was not valid utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::CellValue as V;
    use std::io::Write;

    #[test]
    fn export_then_reload_preserves_shape() {
        let ds = Dataset::new(
            vec!["Sede".into(), "Producto".into(), "Cantidad".into()],
            vec![
                vec![
                    V::String("Norte".into()),
                    V::String("Tornillo".into()),
                    V::Integer(10),
                ],
                vec![
                    V::String("Sur".into()),
                    V::String("Tuerca, grande".into()),
                    V::Float(2.5),
                ],
                vec![V::String("Centro".into()), V::Null, V::Null],
            ],
        );

        let csv_text = dataset_to_csv(&ds).unwrap();

        let path = std::env::temp_dir().join(format!(
            "rusty-stock-{}-roundtrip.csv",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(csv_text.as_bytes()).unwrap();

        let reloaded = load_file(&path).unwrap();
        let back = &reloaded.sheets[0].data;

        assert_eq!(back.columns, ds.columns);
        assert_eq!(back.len(), ds.len());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn quoted_fields_survive_the_round_trip() {
        let ds = Dataset::new(
            vec!["producto".into()],
            vec![vec![V::String("tuerca, M8 \"inox\"".into())]],
        );
        let csv_text = dataset_to_csv(&ds).unwrap();
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.get(0), Some("tuerca, M8 \"inox\""));
    }
}
