use crate::error::DigipinError;
use geo::CoordsIter;
use geo_types::{Geometry, GeometryCollection};
use geojson::{Feature, GeoJson};
use std::str::FromStr;
use wkt::Wkt;

/// Parses WKT or GeoJSON text into a geometry ready for [`DigipinCell::from_geometry`].
///
/// GeoJSON is recognised by a leading `{`. The geometry must carry at least
/// one coordinate and every coordinate must be finite.
///
/// [`DigipinCell::from_geometry`]: crate::DigipinCell::from_geometry
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigipinError> {
    match s.trim() {
        text if text.starts_with('{') => parse_geojson(text),
        text => parse_wkt(text),
    }
}

/// Parses a GeoJSON geometry, feature or feature collection.
///
/// A feature collection becomes a `GeometryCollection` of its features'
/// geometries, so every feature yields its own cells.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let geojson: GeoJson = s.parse().map_err(|e: geojson::Error| parse_error(e))?;

    let geom = match geojson {
        GeoJson::Geometry(g) => Geometry::try_from(g).map_err(parse_error)?,
        GeoJson::Feature(feature) => feature_geometry(feature)?,
        GeoJson::FeatureCollection(collection) => {
            let members = collection
                .features
                .into_iter()
                .map(feature_geometry)
                .collect::<Result<Vec<_>, _>>()?;
            Geometry::GeometryCollection(GeometryCollection(members))
        }
    };
    indexable(geom)
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let wkt = Wkt::<f64>::from_str(s).map_err(parse_error)?;
    let geom: Geometry<f64> = wkt
        .try_into()
        .map_err(|_| parse_error("WKT has no geo-types equivalent"))?;
    indexable(geom)
}

fn feature_geometry(feature: Feature) -> Result<Geometry<f64>, DigipinError> {
    let g = feature
        .geometry
        .ok_or_else(|| parse_error("Feature has no geometry"))?;
    Geometry::try_from(g).map_err(parse_error)
}

fn indexable(geom: Geometry<f64>) -> Result<Geometry<f64>, DigipinError> {
    if geom.coords_count() == 0 {
        return Err(parse_error("Geometry has no coordinates"));
    }
    if let Some(c) = geom
        .coords_iter()
        .find(|c| !c.x.is_finite() || !c.y.is_finite())
    {
        return Err(DigipinError::GeometryParseError(format!(
            "Non-finite coordinate ({}, {})",
            c.x, c.y
        )));
    }
    Ok(geom)
}

fn parse_error(e: impl std::fmt::Display) -> DigipinError {
    DigipinError::GeometryParseError(e.to_string())
}
