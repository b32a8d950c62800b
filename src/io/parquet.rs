use crate::cell::DigipinCell;
use crate::error::DigipinError;
use crate::io::arrow::DigipinCellsToArrow;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;

/// Writes cells to a GeoParquet file, one row per cell with a WKB polygon column.
///
/// Columns follow [`DigipinCellsToArrow::to_record_batch`]. An empty slice is
/// rejected rather than written as a file with no rows.
pub fn write_geoparquet(cells: &[DigipinCell], path: impl AsRef<Path>) -> Result<(), DigipinError> {
    if cells.is_empty() {
        return Err(DigipinError::ExportError("No cells to write".to_string()));
    }
    let batch = cells.to_record_batch()?;

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let mut encoder =
        GeoParquetRecordBatchEncoder::try_new(&batch.schema(), &options).map_err(export_error)?;
    let encoded = encoder.encode_record_batch(&batch).map_err(export_error)?;

    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer =
        ArrowWriter::try_new(file, encoder.target_schema(), None).map_err(export_error)?;
    writer.write(&encoded).map_err(export_error)?;
    writer.append_key_value_metadata(encoder.into_keyvalue().map_err(export_error)?);
    writer.finish().map_err(export_error)?;

    log::debug!("Wrote {} cells to {}", cells.len(), path.display());
    Ok(())
}

fn export_error(e: impl std::fmt::Display) -> DigipinError {
    DigipinError::ExportError(e.to_string())
}

pub trait DigipinCellsToGeoParquet: DigipinCellsToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError>;
}

impl DigipinCellsToGeoParquet for [DigipinCell] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        write_geoparquet(self, path)
    }
}

impl DigipinCellsToGeoParquet for Vec<DigipinCell> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        write_geoparquet(self, path)
    }
}
