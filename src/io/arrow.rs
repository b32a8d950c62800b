use crate::cell::DigipinCell;
use crate::error::DigipinError;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt8Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`DigipinCell`]s to Arrow arrays.
///
/// Implemented for `[DigipinCell]` and `Vec<DigipinCell>`.
pub trait DigipinCellsToArrow {
    /// Converts cell centers to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cells to an Arrow PolygonArray of rectangles.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with code, level, bounds and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, DigipinError>;
}

impl DigipinCellsToArrow for [DigipinCell] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for cell in self {
            builder.push_point(Some(&cell.center()));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self
            .par_iter()
            .map(|c: &DigipinCell| c.to_polygon())
            .collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, DigipinError> {
        let polygon_array = self.to_arrow_polygons();
        let codes: StringArray = self.iter().map(|c| Some(c.code.as_str())).collect();
        let levels: UInt8Array = self.iter().map(|c| Some(c.level)).collect();
        let min_lats: Float64Array = self.iter().map(|c| Some(c.bounds.min_lat)).collect();
        let max_lats: Float64Array = self.iter().map(|c| Some(c.bounds.max_lat)).collect();
        let min_lons: Float64Array = self.iter().map(|c| Some(c.bounds.min_lon)).collect();
        let max_lons: Float64Array = self.iter().map(|c| Some(c.bounds.max_lon)).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("code", DataType::Utf8, false),
            Field::new("level", DataType::UInt8, false),
            Field::new("min_lat", DataType::Float64, false),
            Field::new("max_lat", DataType::Float64, false),
            Field::new("min_lon", DataType::Float64, false),
            Field::new("max_lon", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(codes),
                Arc::new(levels),
                Arc::new(min_lats),
                Arc::new(max_lats),
                Arc::new(min_lons),
                Arc::new(max_lons),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| DigipinError::ExportError(e.to_string()))
    }
}

impl DigipinCellsToArrow for Vec<DigipinCell> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, DigipinError> {
        self.as_slice().to_record_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoarrow_array::GeoArrowArray;

    fn sample_cells() -> Result<Vec<DigipinCell>, DigipinError> {
        Ok(vec![
            DigipinCell::from_lat_lon(28.6139, 77.2090)?,
            DigipinCell::from_lat_lon(12.9716, 77.5946)?,
            DigipinCell::from_code("39J")?,
        ])
    }

    #[test]
    fn test_cells_to_arrow_points() -> Result<(), DigipinError> {
        let cells = sample_cells()?;
        assert_eq!(cells.to_arrow_points().len(), 3);
        Ok(())
    }

    #[test]
    fn test_cells_to_arrow_polygons() -> Result<(), DigipinError> {
        let cells = sample_cells()?;
        assert_eq!(cells.as_slice().to_arrow_polygons().len(), 3);
        Ok(())
    }

    #[test]
    fn test_cells_to_record_batch() -> Result<(), DigipinError> {
        let cells = sample_cells()?;
        let batch = cells.to_record_batch()?;

        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 7);
        assert_eq!(batch.schema().field(0).name(), "code");

        let codes = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| DigipinError::ExportError("code column type".to_string()))?;
        assert_eq!(codes.value(0), "39J-438-TJC7");
        assert_eq!(codes.value(2), "39J");
        Ok(())
    }
}
