use crate::error::DigipinError;
use crate::index::constants::{LABEL_GRID, MAX_LEVEL, SEPARATOR, SEPARATOR_AFTER};

/// Returns the `(row, col)` position of a label symbol, or `None` if the
/// character is not part of the 16-symbol alphabet.
pub fn symbol_position(symbol: char) -> Option<(usize, usize)> {
    LABEL_GRID.iter().enumerate().find_map(|(row, symbols)| {
        symbols
            .iter()
            .position(|&s| s == symbol)
            .map(|col| (row, col))
    })
}

/// Validates a full or partial code and returns its bare uppercase symbols.
///
/// Separators are optional, but when present they must sit at the canonical
/// positions (after the 3rd and 6th symbol) and be followed by a symbol.
///
/// # Example
/// ```
/// use digipin_rs::normalize_code;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// assert_eq!(normalize_code("39j-438-tjc7")?, "39J438TJC7");
/// assert_eq!(normalize_code("39J438TJC7")?, "39J438TJC7");
/// # Ok(())
/// # }
/// ```
pub fn normalize_code(code: &str) -> Result<String, DigipinError> {
    let mut symbols = String::with_capacity(MAX_LEVEL as usize);
    let mut pending_separator = false;

    for c in code.trim().chars() {
        if c == SEPARATOR {
            let count = symbols.len();
            if pending_separator || !SEPARATOR_AFTER.iter().any(|&l| l as usize == count) {
                return Err(DigipinError::InvalidSymbol(c));
            }
            pending_separator = true;
            continue;
        }

        let upper = c.to_ascii_uppercase();
        if symbol_position(upper).is_none() {
            return Err(DigipinError::InvalidSymbol(c));
        }
        symbols.push(upper);
        pending_separator = false;
    }

    if pending_separator {
        return Err(DigipinError::InvalidSymbol(SEPARATOR));
    }
    if symbols.is_empty() || symbols.len() > MAX_LEVEL as usize {
        return Err(DigipinError::InvalidCodeLength(symbols.len()));
    }
    Ok(symbols)
}

/// Formats a code in canonical `XXX-XXX-XXXX` form.
///
/// Partial codes are grouped the same way but never end in a separator.
pub fn format_code(code: &str) -> Result<String, DigipinError> {
    let symbols = normalize_code(code)?;
    Ok(insert_separators(&symbols))
}

/// Returns the formatted prefix of `code` at `level`.
pub fn code_prefix(code: &str, level: u8) -> Result<String, DigipinError> {
    let symbols = normalize_code(code)?;
    if level == 0 || level as usize > symbols.len() {
        return Err(DigipinError::InvalidLevel(level));
    }
    Ok(insert_separators(&symbols[..level as usize]))
}

/// Returns the first dash-delimited group of a code, or the whole input if it has none.
pub fn leading_group(code: &str) -> &str {
    code.split_once(SEPARATOR).map_or(code, |(head, _)| head)
}

// Symbols are ASCII, so byte counts are symbol counts.
pub(crate) fn insert_separators(symbols: &str) -> String {
    let mut out = String::with_capacity(symbols.len() + SEPARATOR_AFTER.len());
    for (i, c) in symbols.chars().enumerate() {
        if i > 0 && SEPARATOR_AFTER.iter().any(|&l| l as usize == i) {
            out.push(SEPARATOR);
        }
        out.push(c);
    }
    out
}
