/// Label grid: one symbol per sub-cell, indexed `[row][col]`.
///
/// Row 0 is the northernmost band, column 0 the westernmost.
pub const LABEL_GRID: [[char; 4]; 4] = [
    ['F', 'C', '9', '8'],
    ['J', '3', '2', '7'],
    ['K', '4', '5', '6'],
    ['L', 'M', 'P', 'T'],
];

/// Encodable domain [min_lon, min_lat, max_lon, max_lat], bounds inclusive
pub const DOMAIN_EXTENTS: [f64; 4] = [63.5, 2.5, 99.5, 38.5];

/// Rows and columns per subdivision
pub const GRID_DIVISIONS: usize = 4;

/// Number of subdivision levels in a full code
pub const MAX_LEVEL: u8 = 10;

/// Separator between code groups
pub const SEPARATOR: char = '-';

/// Levels after which a separator is written (groups of 3-3-4)
pub(crate) const SEPARATOR_AFTER: [u8; 2] = [3, 6];
