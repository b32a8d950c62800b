use crate::coord::Coordinate;
use crate::error::DigipinError;
use crate::geom::create_cell_polygon;
use crate::index::{
    CellBounds, GRID_DIVISIONS, LABEL_GRID, MAX_LEVEL, SEPARATOR, code_prefix, decode_digipin, format_code,
    leading_group, locate, normalize_code,
};
use crate::io::arrow::DigipinCellsToArrow;
use crate::io::parquet::DigipinCellsToGeoParquet;
use arrow_array::RecordBatch;
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon};
use geoarrow_array::array::{PointArray, PolygonArray};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// A single cell of the DIGIPIN grid.
///
/// Each `DigipinCell` pairs a (full or partial) code with the latitude/longitude
/// bounds it names and its level in the hierarchy.
///
/// # Example
///
/// ```
/// use digipin_rs::DigipinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// // Create from a WGS84 (lon, lat) coordinate
/// let cell = DigipinCell::from_wgs84(&(77.2090, 28.6139))?;
/// println!("Code: {}", cell.code);
/// println!("Center: ({}, {})", cell.center().y(), cell.center().x());
///
/// // The rectangle as a polygon for GIS work
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigipinCell {
    /// Canonical code, e.g. `39J-438-TJC7` (or a prefix such as `39J`)
    pub code: String,
    /// Cell bounds in WGS84 degrees
    pub bounds: CellBounds,
    /// Level (1-10), the number of symbols in `code`
    pub level: u8,
}

impl DigipinCell {
    pub(crate) fn new(code: String, bounds: CellBounds, level: u8) -> Self {
        Self {
            code,
            bounds,
            level,
        }
    }

    /// Create a level-10 cell from an explicit latitude and longitude.
    pub fn from_lat_lon(lat: f64, lon: f64) -> Result<Self, DigipinError> {
        Self::from_lat_lon_at_level(lat, lon, MAX_LEVEL)
    }

    /// Create the cell containing `(lat, lon)` at the given level (1-10).
    pub fn from_lat_lon_at_level(lat: f64, lon: f64, level: u8) -> Result<Self, DigipinError> {
        let (code, bounds) = locate(lat, lon, level)?;
        Ok(Self::new(code, bounds, level))
    }

    /// Create a level-10 cell from a WGS84 coordinate ordered `(lon, lat)`.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigipinCell;
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let from_tuple = DigipinCell::from_wgs84(&(77.2090, 28.6139))?;
    /// let from_point = DigipinCell::from_wgs84(&Point::new(77.2090, 28.6139))?;
    /// assert_eq!(from_tuple.code, from_point.code);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_wgs84(coord: &impl Coordinate) -> Result<Self, DigipinError> {
        Self::from_lat_lon(coord.lat(), coord.lon())
    }

    /// Create a cell from a full or partial code.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigipinCell;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let cell = DigipinCell::from_lat_lon(28.6139, 77.2090)?;
    /// let restored = DigipinCell::from_code(&cell.code)?;
    /// assert_eq!(cell, restored);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, DigipinError> {
        let symbols = normalize_code(code)?;
        let bounds = decode_digipin(&symbols)?;
        Ok(Self::new(format_code(&symbols)?, bounds, symbols.len() as u8))
    }

    /// Create level-10 cells along a LineString in WGS84 coordinates.
    ///
    /// Samples points every half cell along the line and returns each unique cell it crosses.
    /// Vertices outside the domain fail the whole line.
    pub fn from_line_string(line: &LineString<f64>) -> Result<Vec<Self>, DigipinError> {
        let finest = Self::finest_cell_size();
        let step_size = finest * 0.5;

        let mut seen: HashSet<String> = HashSet::new();
        let mut cells: Vec<DigipinCell> = Vec::new();

        let mut push = |lat: f64, lon: f64| -> Result<(), DigipinError> {
            let cell = Self::from_lat_lon(lat, lon)?;
            if seen.insert(cell.code.clone()) {
                cells.push(cell);
            }
            Ok(())
        };

        for window in line.0.windows(2) {
            let start = &window[0];
            let end = &window[1];

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let segment_length = (dx * dx + dy * dy).sqrt();
            let steps = (segment_length / step_size).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                push(start.y + t * dy, start.x + t * dx)?;
            }
        }

        if line.0.len() == 1 {
            let only = line.0[0];
            push(only.y, only.x)?;
        }

        Ok(cells)
    }

    /// Create cells from an arbitrary `geo_types::Geometry` in WGS84.
    ///
    /// Points give one cell each, polygons give the cell of their centroid,
    /// lines give every cell they cross and collections recurse.
    pub fn from_geometry(geom: Geometry<f64>) -> Result<Vec<Self>, DigipinError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt)?]),
            Geometry::MultiPoint(mp) => mp.0.iter().map(|pt| Self::from_wgs84(pt)).collect(),
            Geometry::LineString(line) => Self::from_line_string(&line),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in &mls.0 {
                    all_cells.extend(Self::from_line_string(line)?);
                }
                Ok(all_cells)
            }
            Geometry::Polygon(poly) => match poly.centroid() {
                Some(centroid) => Ok(vec![Self::from_wgs84(&centroid)?]),
                None => Ok(vec![]),
            },
            Geometry::MultiPolygon(mp) => {
                let mut cells = Vec::new();
                for poly in &mp.0 {
                    if let Some(centroid) = poly.centroid() {
                        cells.push(Self::from_wgs84(&centroid)?);
                    }
                }
                Ok(cells)
            }
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g)?);
                }
                Ok(all_cells)
            }
            _ => Err(DigipinError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    /// Returns the cell midpoint as a `Point` (x = longitude, y = latitude).
    pub fn center(&self) -> Point<f64> {
        self.bounds.center()
    }

    /// True when the cell's inclusive bounds contain the `(lon, lat)` coordinate.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bounds.contains(coord.lat(), coord.lon())
    }

    /// The first dash-delimited group of the code, e.g. `39J`.
    pub fn leading_group(&self) -> &str {
        leading_group(&self.code)
    }

    /// The enclosing cell at a coarser `level`.
    pub fn prefix(&self, level: u8) -> Result<Self, DigipinError> {
        Self::from_code(&code_prefix(&self.code, level)?)
    }

    /// The enclosing cell one level up, or `None` at level 1.
    pub fn parent(&self) -> Option<Self> {
        if self.level <= 1 {
            return None;
        }
        self.prefix(self.level - 1).ok()
    }

    /// The 16 cells one level down, in label-grid order (row-major, north-west first).
    /// Empty at level 10.
    pub fn children(&self) -> Vec<Self> {
        if self.level >= MAX_LEVEL {
            return Vec::new();
        }
        let symbols: String = self.code.chars().filter(|&c| c != SEPARATOR).collect();

        let mut children = Vec::with_capacity(GRID_DIVISIONS * GRID_DIVISIONS);
        for (row, labels) in LABEL_GRID.iter().enumerate() {
            for (col, label) in labels.iter().enumerate() {
                let child_symbols = format!("{}{}", symbols, label);
                if let Ok(code) = format_code(&child_symbols) {
                    children.push(Self::new(code, self.bounds.child(row, col), self.level + 1));
                }
            }
        }
        children
    }

    /// Converts this cell to a rectangular polygon.
    ///
    /// Returns a `geo_types::Polygon` suitable for spatial operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_cell_polygon(&self.bounds)
    }

    /// Converts this cell's center to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this cell to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, DigipinError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }

    // Smaller of the level-10 cell's spans, in degrees.
    fn finest_cell_size() -> f64 {
        let divisor = (GRID_DIVISIONS as f64).powi(MAX_LEVEL as i32);
        CellBounds::DOMAIN
            .lat_span()
            .min(CellBounds::DOMAIN.lon_span())
            / divisor
    }
}
