use crate::index::CellBounds;
use geo_types::{LineString, Polygon, coord};

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Builds the closed rectangular ring of a cell, counter-clockwise from the south-west corner.
pub fn create_cell_polygon(bounds: &CellBounds) -> Polygon<f64> {
    let ring = LineString::from(vec![
        coord! { x: bounds.min_lon, y: bounds.min_lat },
        coord! { x: bounds.max_lon, y: bounds.min_lat },
        coord! { x: bounds.max_lon, y: bounds.max_lat },
        coord! { x: bounds.min_lon, y: bounds.max_lat },
        coord! { x: bounds.min_lon, y: bounds.min_lat },
    ]);
    Polygon::new(ring, vec![])
}

pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    geojson::Geometry::from(polygon).to_string()
}

pub fn format_polygon(polygon: &Polygon<f64>, format: GeometryFormat) -> String {
    match format {
        GeometryFormat::Wkt => polygon_to_wkt(polygon),
        GeometryFormat::GeoJson => polygon_to_geojson(polygon),
    }
}
