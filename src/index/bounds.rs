use crate::index::constants::{DOMAIN_EXTENTS, GRID_DIVISIONS};
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A rectangular latitude/longitude cell at some level of the grid.
///
/// Bounds are inclusive on every side. Sub-cell edges are derived from the
/// parent's edges by repeated subtraction (rows) and addition (columns), never
/// from the domain directly, so the encoder and decoder agree bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl CellBounds {
    /// The root cell: the whole encodable domain.
    pub const DOMAIN: CellBounds = CellBounds {
        min_lat: DOMAIN_EXTENTS[1],
        max_lat: DOMAIN_EXTENTS[3],
        min_lon: DOMAIN_EXTENTS[0],
        max_lon: DOMAIN_EXTENTS[2],
    };

    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Inclusive containment test. NaN is never contained.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Midpoint of the cell as a `Point` (x = longitude, y = latitude).
    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// True when `other` lies entirely within this cell.
    pub fn encloses(&self, other: &CellBounds) -> bool {
        other.min_lat >= self.min_lat
            && other.max_lat <= self.max_lat
            && other.min_lon >= self.min_lon
            && other.max_lon <= self.max_lon
    }

    /// Selects the sub-cell containing `(lat, lon)`.
    ///
    /// Rows are scanned north to south and columns west to east; the first
    /// band that contains the value wins, so a value on a shared edge goes to
    /// the northern row and the western column. If floating-point residue
    /// leaves a value outside every band, the last band is taken.
    pub(crate) fn select(&self, lat: f64, lon: f64) -> (usize, usize, CellBounds) {
        // Unmatched rows fall to the last band too, not row 0 with bounds past the edge
        let (row, (min_lat, max_lat)) = first_containing(self.row_bands(), lat);
        let (col, (min_lon, max_lon)) = first_containing(self.col_bands(), lon);
        (row, col, CellBounds::new(min_lat, max_lat, min_lon, max_lon))
    }

    /// Bounds of the sub-cell at `(row, col)`, computed exactly as `select` computes them.
    pub(crate) fn child(&self, row: usize, col: usize) -> CellBounds {
        let (min_lat, max_lat) = nth_band(self.row_bands(), row);
        let (min_lon, max_lon) = nth_band(self.col_bands(), col);
        CellBounds::new(min_lat, max_lat, min_lon, max_lon)
    }

    /// Latitude bands `(min, max)` from row 0 (north) to the last row.
    fn row_bands(&self) -> impl Iterator<Item = (f64, f64)> {
        let height = self.lat_span() / GRID_DIVISIONS as f64;
        std::iter::successors(Some((self.max_lat - height, self.max_lat)), move |&(min, _)| {
            Some((min - height, min))
        })
        .take(GRID_DIVISIONS)
    }

    /// Longitude bands `(min, max)` from column 0 (west) to the last column.
    fn col_bands(&self) -> impl Iterator<Item = (f64, f64)> {
        let width = self.lon_span() / GRID_DIVISIONS as f64;
        std::iter::successors(Some((self.min_lon, self.min_lon + width)), move |&(_, max)| {
            Some((max, max + width))
        })
        .take(GRID_DIVISIONS)
    }
}

fn first_containing(bands: impl Iterator<Item = (f64, f64)>, value: f64) -> (usize, (f64, f64)) {
    let mut last = (0, (f64::NAN, f64::NAN));
    for (i, (min, max)) in bands.enumerate() {
        if value >= min && value <= max {
            return (i, (min, max));
        }
        last = (i, (min, max));
    }
    last
}

// Indices past the last band clamp to it.
fn nth_band(bands: impl Iterator<Item = (f64, f64)>, n: usize) -> (f64, f64) {
    bands.take(n + 1).last().unwrap_or((f64::NAN, f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_bounds() {
        let d = CellBounds::DOMAIN;
        assert_eq!(d.min_lat, 2.5);
        assert_eq!(d.max_lat, 38.5);
        assert_eq!(d.min_lon, 63.5);
        assert_eq!(d.max_lon, 99.5);
        assert_eq!(d.lat_span(), 36.0);
        assert_eq!(d.lon_span(), 36.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let d = CellBounds::DOMAIN;
        assert!(d.contains(2.5, 63.5));
        assert!(d.contains(38.5, 99.5));
        assert!(!d.contains(2.49, 63.5));
        assert!(!d.contains(38.5, 99.51));
        assert!(!d.contains(f64::NAN, 70.0));
    }

    #[test]
    fn test_select_interior() {
        let (row, col, sub) = CellBounds::DOMAIN.select(28.6139, 77.2090);
        assert_eq!((row, col), (1, 1));
        assert_eq!(sub, CellBounds::new(20.5, 29.5, 72.5, 81.5));
    }

    #[test]
    fn test_select_shared_edge_prefers_north_and_west() {
        // 29.5 splits rows 0/1 and 72.5 splits columns 0/1
        let (row, col, _) = CellBounds::DOMAIN.select(29.5, 72.5);
        assert_eq!((row, col), (0, 0));
    }

    #[test]
    fn test_select_outer_edges() {
        let (row, col, _) = CellBounds::DOMAIN.select(2.5, 99.5);
        assert_eq!((row, col), (3, 3));
        let (row, col, _) = CellBounds::DOMAIN.select(38.5, 63.5);
        assert_eq!((row, col), (0, 0));
    }

    #[test]
    fn test_child_matches_select() {
        let d = CellBounds::DOMAIN;
        for row in 0..GRID_DIVISIONS {
            for col in 0..GRID_DIVISIONS {
                let child = d.child(row, col);
                let center = child.center();
                let (r, c, selected) = d.select(center.y(), center.x());
                assert_eq!((r, c), (row, col));
                assert_eq!(selected, child);
                assert!(d.encloses(&child));
            }
        }
    }

    #[test]
    fn test_select_column_past_east_edge_takes_last_band() {
        let cell = CellBounds::new(0.0, 4.0, 0.0, 4.0);
        let (row, col, sub) = cell.select(2.0, 4.0 + 1e-9);
        assert_eq!((row, col), (1, 3));
        assert_eq!((sub.min_lon, sub.max_lon), (3.0, 4.0));
        assert_eq!((sub.min_lat, sub.max_lat), (2.0, 3.0));
    }

    #[test]
    fn test_select_row_past_south_edge_takes_last_band() {
        let cell = CellBounds::new(0.0, 4.0, 0.0, 4.0);
        let (row, col, sub) = cell.select(-1e-9, 0.5);
        assert_eq!((row, col), (3, 0));
        assert_eq!((sub.min_lat, sub.max_lat), (0.0, 1.0));
        assert_eq!((sub.min_lon, sub.max_lon), (0.0, 1.0));
    }

    #[test]
    fn test_select_outside_both_axes_takes_south_east_corner() {
        let cell = CellBounds::new(0.0, 4.0, 0.0, 4.0);
        let (row, col, sub) = cell.select(-1.0, 5.0);
        assert_eq!((row, col), (3, 3));
        assert_eq!(sub, cell.child(3, 3));
    }

    #[test]
    fn test_child_is_independent_of_fallback() {
        let cell = CellBounds::new(0.0, 4.0, 0.0, 4.0);
        for n in 0..GRID_DIVISIONS {
            let child = cell.child(n, n);
            let expected_max_lat = 4.0 - n as f64;
            assert_eq!((child.min_lat, child.max_lat), (expected_max_lat - 1.0, expected_max_lat));
            assert_eq!((child.min_lon, child.max_lon), (n as f64, n as f64 + 1.0));
        }
    }
}
