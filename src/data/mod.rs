/// Data layer: core types, loading, column resolution, and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SheetCollection (sheet name → Dataset)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ resolver  │  column names → ColumnMapping (sede/producto/…)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  Dataset + ColumnMapping → Analysis (metrics, tables)
///   └──────────┘
/// ```
pub mod aggregate;
pub mod export;
pub mod loader;
pub mod model;
pub mod resolver;
