pub mod arrow;
pub mod csv;
pub mod json;
pub mod parquet;

pub use self::arrow::DigipinCellsToArrow;
pub use self::csv::{
    CoordinateSource, CsvDigipinConfig, CsvSummary, CsvToDigipin, OutOfDomainPolicy,
    csv_to_digipin_csv,
};
pub use self::json::write_report_json;
pub use self::parquet::{DigipinCellsToGeoParquet, write_geoparquet};
