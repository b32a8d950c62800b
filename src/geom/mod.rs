mod parse;
mod polygon;

pub use parse::{parse_geojson, parse_geometry, parse_wkt};
pub use polygon::{
    GeometryFormat, create_cell_polygon, format_polygon, polygon_to_geojson, polygon_to_wkt,
};
