//! # digipin-rs
//!
//! DIGIPIN splits a fixed latitude/longitude box (2.5..=38.5 N, 63.5..=99.5 E)
//! into a 4×4 grid ten times over and names the final cell with a 10-symbol
//! code such as `39J-438-TJC7`. There are currently three main entry points.
//!
//! ### 1. `encode_digipin` / `decode_digipin` - The Grid Itself
//!
//! ```
//! use digipin_rs::{decode_digipin, encode_digipin};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let code = encode_digipin(28.6139, 77.2090)?;
//! assert_eq!(code, "39J-438-TJC7");
//!
//! let bounds = decode_digipin(&code)?;
//! assert!(bounds.contains(28.6139, 77.2090));
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `DigipinCell` - Cells as Geometries
//!
//! ```
//! use digipin_rs::DigipinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let cell = DigipinCell::from_wgs84(&(77.2090, 28.6139))?;
//! let parent = cell.prefix(3)?;
//! assert_eq!(parent.code, "39J");
//! let polygon = parent.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `PrefixReport` - Dominant Prefixes per Region
//!
//! Sample a region's bounding box, encode each sample and report the most
//! common leading group:
//!
//! ```no_run
//! use digipin_rs::{PrefixReport, default_regions, write_report_json};
//!
//! let report = PrefixReport::build(&default_regions());
//! write_report_json(&report, "green_prefixes.json").unwrap();
//! ```
//!
//! CSV files with coordinate or geometry columns can be tagged with codes
//! using [`csv_to_digipin_csv`].

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;
pub mod region;
pub mod report;
pub mod sampling;

pub use cell::DigipinCell;
pub use coord::Coordinate;
pub use error::DigipinError;
pub use geom::{GeometryFormat, parse_geometry};
pub use index::{
    CellBounds, DOMAIN_EXTENTS, LABEL_GRID, MAX_LEVEL, SEPARATOR, code_prefix, decode_digipin,
    encode_digipin, encode_digipin_to_level, format_code, leading_group, normalize_code,
    symbol_position,
};
pub use io::{
    CoordinateSource, CsvDigipinConfig, CsvSummary, CsvToDigipin, DigipinCellsToArrow,
    DigipinCellsToGeoParquet, OutOfDomainPolicy, csv_to_digipin_csv, write_geoparquet,
    write_report_json,
};
pub use region::{Region, default_regions, load_regions};
pub use report::{Confidence, PrefixAnalysis, PrefixReport, analyze_codes, analyze_region};
pub use sampling::{BoundingBox, SampleLabel, SamplePoint, generate_sample_points};

pub use geo_types;
