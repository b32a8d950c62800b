use crate::error::DigipinError;
use crate::sampling::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A named area to analyse, such as a city.
///
/// JSON form: `{"name": "Delhi", "bbox": [28.4, 76.8, 28.9, 77.3]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub bbox: BoundingBox,
}

impl Region {
    pub fn new(name: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            name: name.into(),
            bbox,
        }
    }
}

/// Built-in bounding boxes for a handful of major Indian cities.
pub fn default_regions() -> Vec<Region> {
    vec![
        Region::new("Hyderabad", BoundingBox::new(17.1, 78.2, 17.6, 78.7)),
        Region::new("Delhi", BoundingBox::new(28.4, 76.8, 28.9, 77.3)),
        Region::new("Mumbai", BoundingBox::new(18.8, 72.7, 19.3, 73.0)),
        Region::new("Bangalore", BoundingBox::new(12.8, 77.4, 13.1, 77.8)),
        Region::new("Chennai", BoundingBox::new(12.9, 80.1, 13.2, 80.3)),
    ]
}

/// Loads regions from a JSON file holding an array of `{name, bbox}` objects.
pub fn load_regions(path: impl AsRef<Path>) -> Result<Vec<Region>, DigipinError> {
    let file = File::open(path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let regions: Vec<Region> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| DigipinError::JsonError(e.to_string()))?;

    for region in &regions {
        let b = &region.bbox;
        if b.min_lat > b.max_lat || b.min_lon > b.max_lon {
            log::warn!("Region '{}' has an inverted bounding box", region.name);
        }
    }
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_regions() {
        let regions = default_regions();
        assert_eq!(regions.len(), 5);
        assert_eq!(regions[1].name, "Delhi");
        assert_eq!(regions[1].bbox, BoundingBox::new(28.4, 76.8, 28.9, 77.3));
    }

    #[test]
    fn test_load_regions() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let path = dir.path().join("regions.json");

        let mut file = File::create(&path).map_err(|e| DigipinError::IoError(e.to_string()))?;
        writeln!(
            file,
            r#"[{{"name": "Pune", "bbox": [18.4, 73.7, 18.7, 74.0]}}, {{"name": "Kochi", "bbox": [9.9, 76.2, 10.1, 76.4]}}]"#
        )
        .map_err(|e| DigipinError::IoError(e.to_string()))?;

        let regions = load_regions(&path)?;
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], Region::new("Pune", BoundingBox::new(18.4, 73.7, 18.7, 74.0)));
        Ok(())
    }

    #[test]
    fn test_load_regions_bad_json() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let path = dir.path().join("regions.json");
        std::fs::write(&path, r#"[{"name": "Pune"}]"#)
            .map_err(|e| DigipinError::IoError(e.to_string()))?;

        assert!(matches!(load_regions(&path), Err(DigipinError::JsonError(_))));
        Ok(())
    }

    #[test]
    fn test_load_regions_missing_file() {
        assert!(matches!(
            load_regions("/nonexistent/regions.json"),
            Err(DigipinError::IoError(_))
        ));
    }
}
