use crate::cell::DigipinCell;
use crate::error::DigipinError;
use crate::geom::{GeometryFormat, format_polygon, parse_geometry};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate latitude and longitude columns in decimal degrees
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
}

/// What to do with rows whose location falls outside the encodable domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfDomainPolicy {
    /// Keep the row with an empty code
    #[default]
    WriteEmpty,
    /// Drop the row
    Skip,
}

#[derive(Debug, Clone)]
pub struct CsvDigipinConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub out_of_domain: OutOfDomainPolicy,
}

impl CsvDigipinConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigipinConfig;
    ///
    /// let config = CsvDigipinConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            out_of_domain: OutOfDomainPolicy::default(),
        }
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::{CsvDigipinConfig, OutOfDomainPolicy};
    ///
    /// let config = CsvDigipinConfig::from_coords("Latitude", "Longitude")
    ///     .out_of_domain(OutOfDomainPolicy::Skip);
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lat_column: lat_column.into(),
                lon_column: lon_column.into(),
            },
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            out_of_domain: OutOfDomainPolicy::default(),
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    // Include the cell polygon in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    pub fn out_of_domain(mut self, policy: OutOfDomainPolicy) -> Self {
        self.out_of_domain = policy;
        self
    }
}

/// Row counts from a CSV conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CsvSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_out_of_domain: usize,
}

pub trait CsvToDigipin {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<CsvSummary, DigipinError>;
}

impl<P: AsRef<Path>> CsvToDigipin for P {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<CsvSummary, DigipinError> {
        csv_to_digipin_csv(self, output_path, config)
    }
}

fn find_column(headers: &csv::StringRecord, name: &str, kind: &str) -> Result<usize, DigipinError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DigipinError::CsvError(format!("{} column '{}' not found", kind, name)))
}

fn parse_degrees(record: &csv::StringRecord, idx: usize, kind: &str) -> Result<f64, DigipinError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| DigipinError::CsvError(format!("Missing {} column at index {}", kind, idx)))?
        .trim();
    raw.parse()
        .map_err(|_| DigipinError::CsvError(format!("Invalid {}: '{}'", kind, raw)))
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file with DIGIPIN codes.
///
/// The output starts with a `digipin` column (and `cell_geometry` when
/// requested) followed by every input column that is neither a source nor an
/// excluded column. Geometries covering several cells yield one row per cell.
/// Rows are streamed, so large files are not held in memory.
///
/// # Example
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvDigipinConfig, GeometryFormat};
///
/// let config = CsvDigipinConfig::from_coords("Latitude", "Longitude")
///     .exclude(vec!["Notes".into()])
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_digipin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_digipin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvDigipinConfig,
) -> Result<CsvSummary, DigipinError> {
    let file = File::open(csv_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DigipinError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = find_column(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = find_column(&headers, lat_column, "Latitude")?;
            let lon_idx = find_column(&headers, lon_column, "Longitude")?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["digipin"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    let mut summary = CsvSummary::default();

    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DigipinError::CsvError(e.to_string()))?;
        summary.rows_read += 1;

        let encoded = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    DigipinError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                DigipinCell::from_geometry(parse_geometry(geom_str)?)
            }
            SourceIndices::Coordinates { lat_idx, lon_idx } => {
                let lat = parse_degrees(&record, *lat_idx, "latitude")?;
                let lon = parse_degrees(&record, *lon_idx, "longitude")?;
                DigipinCell::from_lat_lon(lat, lon).map(|cell| vec![cell])
            }
        };

        let cells = match encoded {
            Ok(cells) => cells.into_iter().map(Some).collect::<Vec<_>>(),
            Err(e @ DigipinError::OutOfDomain { .. }) => {
                summary.rows_out_of_domain += 1;
                match config.out_of_domain {
                    OutOfDomainPolicy::Skip => {
                        log::warn!("Skipping record {}: {}", line + 1, e);
                        continue;
                    }
                    OutOfDomainPolicy::WriteEmpty => {
                        log::warn!("Record {} has no code: {}", line + 1, e);
                        vec![None]
                    }
                }
            }
            Err(e) => return Err(e),
        };

        for cell in cells {
            let code = cell.as_ref().map(|c| c.code.clone()).unwrap_or_default();
            let mut row: Vec<String> = vec![code];

            if let Some(format) = config.include_cell_geometry {
                let geom_str = cell
                    .as_ref()
                    .map(|c| format_polygon(&c.to_polygon(), format))
                    .unwrap_or_default();
                row.push(geom_str);
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| DigipinError::CsvError(e.to_string()))?;
            summary.rows_written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    Ok(summary)
}
