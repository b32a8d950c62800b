use crate::error::DigipinError;
use crate::index::bounds::CellBounds;
use crate::index::code::{normalize_code, symbol_position};

/// Decodes a full or partial code into the bounds of the cell it names.
///
/// Each symbol narrows the cell exactly the way the encoder does, so the
/// bounds returned for `encode_digipin(lat, lon)` always contain `(lat, lon)`.
/// Separators are optional and letter case is ignored.
///
/// # Example
/// ```
/// use digipin_rs::decode_digipin;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let bounds = decode_digipin("39J")?;
/// assert_eq!(bounds.min_lat, 28.375);
/// assert_eq!(bounds.max_lon, 77.5625);
/// # Ok(())
/// # }
/// ```
pub fn decode_digipin(code: &str) -> Result<CellBounds, DigipinError> {
    let symbols = normalize_code(code)?;

    let mut bounds = CellBounds::DOMAIN;
    for symbol in symbols.chars() {
        let (row, col) = symbol_position(symbol).ok_or(DigipinError::InvalidSymbol(symbol))?;
        bounds = bounds.child(row, col);
    }
    Ok(bounds)
}
