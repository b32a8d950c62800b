use crate::error::DigipinError;
use crate::report::PrefixReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a prefix report as pretty-printed JSON.
///
/// # Example
///
/// ```no_run
/// use digipin_rs::{PrefixReport, default_regions, write_report_json};
///
/// let report = PrefixReport::build(&default_regions());
/// write_report_json(&report, "green_prefixes.json").unwrap();
/// ```
pub fn write_report_json(report: &PrefixReport, path: impl AsRef<Path>) -> Result<(), DigipinError> {
    let file = File::create(path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(|e| DigipinError::JsonError(e.to_string()))?;
    writer
        .write_all(b"\n")
        .map_err(|e| DigipinError::IoError(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| DigipinError::IoError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::default_regions;
    use tempfile::tempdir;

    #[test]
    fn test_write_report_json() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(|e| DigipinError::IoError(e.to_string()))?;
        let path = dir.path().join("green_prefixes.json");

        let report = PrefixReport::build(&default_regions());
        write_report_json(&report, &path)?;

        let text = std::fs::read_to_string(&path).map_err(|e| DigipinError::IoError(e.to_string()))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| DigipinError::JsonError(e.to_string()))?;

        assert_eq!(value["metadata"]["total_cities"], 5);
        assert_eq!(value["cities"]["Hyderabad"]["green"], "422");
        assert_eq!(value["cities"]["Hyderabad"]["coverage"], 54.5);
        assert_eq!(value["cities"]["Hyderabad"]["confidence"], "LOW");
        assert_eq!(value["cities"]["Chennai"]["coverage"], 72.7);
        Ok(())
    }

    #[test]
    fn test_write_report_json_bad_path() {
        let report = PrefixReport::build(&[]);
        let result = write_report_json(&report, "/nonexistent/dir/report.json");
        assert!(matches!(result, Err(DigipinError::IoError(_))));
    }
}
