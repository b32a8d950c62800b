use serde::{Deserialize, Serialize};

/// Fraction of the box span used to offset the two buffer points from the center.
pub const BUFFER_INSET: f64 = 0.1;

/// Number of points produced by [`generate_sample_points`].
pub const SAMPLE_COUNT: usize = 11;

/// A latitude/longitude bounding box.
///
/// Serialized as `[min_lat, min_lon, max_lat, max_lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    pub fn mid_lat(&self) -> f64 {
        (self.min_lat + self.max_lat) / 2.0
    }

    pub fn mid_lon(&self) -> f64 {
        (self.min_lon + self.max_lon) / 2.0
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(b: [f64; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.min_lat, b.min_lon, b.max_lat, b.max_lon]
    }
}

/// Where in the bounding box a sample point was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SampleLabel {
    Center,
    North,
    South,
    East,
    West,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "NW")]
    NorthWest,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "SW")]
    SouthWest,
    Buffer1,
    Buffer2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub lat: f64,
    pub lon: f64,
    pub label: SampleLabel,
}

impl SamplePoint {
    fn new(lat: f64, lon: f64, label: SampleLabel) -> Self {
        Self { lat, lon, label }
    }
}

/// Generates the 11 representative points of a bounding box.
///
/// Order: center, the four edge midpoints (N, S, E, W), the four corners
/// (NE, NW, SE, SW), then two buffer points offset from the center by
/// `BUFFER_INSET` of the spans, one towards the north-east and one towards
/// the south-west.
pub fn generate_sample_points(bbox: &BoundingBox) -> Vec<SamplePoint> {
    let mid_lat = bbox.mid_lat();
    let mid_lon = bbox.mid_lon();
    let lat_inset = (bbox.max_lat - bbox.min_lat) * BUFFER_INSET;
    let lon_inset = (bbox.max_lon - bbox.min_lon) * BUFFER_INSET;

    use SampleLabel::*;
    vec![
        SamplePoint::new(mid_lat, mid_lon, Center),
        SamplePoint::new(bbox.max_lat, mid_lon, North),
        SamplePoint::new(bbox.min_lat, mid_lon, South),
        SamplePoint::new(mid_lat, bbox.max_lon, East),
        SamplePoint::new(mid_lat, bbox.min_lon, West),
        SamplePoint::new(bbox.max_lat, bbox.max_lon, NorthEast),
        SamplePoint::new(bbox.max_lat, bbox.min_lon, NorthWest),
        SamplePoint::new(bbox.min_lat, bbox.max_lon, SouthEast),
        SamplePoint::new(bbox.min_lat, bbox.min_lon, SouthWest),
        SamplePoint::new(mid_lat + lat_inset, mid_lon + lon_inset, Buffer1),
        SamplePoint::new(mid_lat - lat_inset, mid_lon - lon_inset, Buffer2),
    ]
}
