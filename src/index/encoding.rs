use crate::error::DigipinError;
use crate::index::bounds::CellBounds;
use crate::index::constants::{LABEL_GRID, MAX_LEVEL, SEPARATOR, SEPARATOR_AFTER};

/// Encodes a coordinate into a full 10-symbol DIGIPIN code.
///
/// The domain is subdivided into a 4×4 grid ten times. At each level the
/// symbol of the sub-cell containing the point is appended, with a separator
/// after the 3rd and 6th symbol (`XXX-XXX-XXXX`).
///
/// Points on a shared edge resolve to the northern row and the western
/// column. Latitudes and longitudes outside the domain (including NaN and
/// infinities) return [`DigipinError::OutOfDomain`].
///
/// # Example
/// ```
/// use digipin_rs::encode_digipin;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let code = encode_digipin(28.6139, 77.2090)?;
/// assert_eq!(code, "39J-438-TJC7");
/// # Ok(())
/// # }
/// ```
pub fn encode_digipin(lat: f64, lon: f64) -> Result<String, DigipinError> {
    encode_digipin_to_level(lat, lon, MAX_LEVEL)
}

/// Encodes a coordinate to a partial code of `level` symbols (1-10).
///
/// The result is always a prefix of [`encode_digipin`] for the same point.
pub fn encode_digipin_to_level(lat: f64, lon: f64, level: u8) -> Result<String, DigipinError> {
    locate(lat, lon, level).map(|(code, _)| code)
}

/// Runs the subdivision down to `level` and returns the formatted code with
/// the bounds of the final cell.
pub(crate) fn locate(lat: f64, lon: f64, level: u8) -> Result<(String, CellBounds), DigipinError> {
    if level == 0 || level > MAX_LEVEL {
        return Err(DigipinError::InvalidLevel(level));
    }
    if !CellBounds::DOMAIN.contains(lat, lon) {
        return Err(DigipinError::OutOfDomain { lat, lon });
    }

    let mut bounds = CellBounds::DOMAIN;
    let mut code = String::with_capacity(MAX_LEVEL as usize + SEPARATOR_AFTER.len());

    for lvl in 1..=level {
        let (row, col, sub) = bounds.select(lat, lon);
        code.push(LABEL_GRID[row][col]);
        if lvl < level && SEPARATOR_AFTER.contains(&lvl) {
            code.push(SEPARATOR);
        }
        bounds = sub;
    }

    Ok((code, bounds))
}
