/// Error type for digipin-rs operations.
#[derive(Debug, PartialEq)]
pub enum DigipinError {
    /// The coordinate lies outside the encodable latitude/longitude domain.
    OutOfDomain { lat: f64, lon: f64 },
    /// The requested grid level is outside the valid range (1-10).
    InvalidLevel(u8),
    /// A code has no symbols or more than ten.
    InvalidCodeLength(usize),
    /// A code contains a character that is not a label symbol, or a misplaced separator.
    InvalidSymbol(char),
    /// File I/O error.
    IoError(String),
    /// CSV parsing or writing error.
    CsvError(String),
    /// JSON (de)serialization error.
    JsonError(String),
    /// Arrow or GeoParquet export error.
    ExportError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for DigipinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigipinError::OutOfDomain { lat, lon } => {
                write!(f, "Coordinate out of domain: ({}, {})", lat, lon)
            }
            DigipinError::InvalidLevel(l) => write!(f, "Invalid level: {}", l),
            DigipinError::InvalidCodeLength(n) => write!(f, "Invalid code length: {}", n),
            DigipinError::InvalidSymbol(c) => write!(f, "Invalid symbol: '{}'", c),
            DigipinError::IoError(msg) => write!(f, "IO error: {}", msg),
            DigipinError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            DigipinError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            DigipinError::ExportError(msg) => write!(f, "Export error: {}", msg),
            DigipinError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for DigipinError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_out_of_domain() {
        let err = DigipinError::OutOfDomain { lat: 2.49, lon: 63.5 };
        assert_eq!(err.to_string(), "Coordinate out of domain: (2.49, 63.5)");
    }

    #[test]
    fn test_display_invalid_symbol() {
        assert_eq!(DigipinError::InvalidSymbol('A').to_string(), "Invalid symbol: 'A'");
    }
}
