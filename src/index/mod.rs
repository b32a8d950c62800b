mod bounds;
mod code;
pub mod constants;
mod decoding;
mod encoding;

pub use bounds::CellBounds;
pub use code::{code_prefix, format_code, leading_group, normalize_code, symbol_position};
pub use constants::{DOMAIN_EXTENTS, GRID_DIVISIONS, LABEL_GRID, MAX_LEVEL, SEPARATOR};
pub use decoding::decode_digipin;
pub use encoding::{encode_digipin, encode_digipin_to_level};
pub(crate) use encoding::locate;
