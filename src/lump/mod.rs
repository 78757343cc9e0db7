mod convert;
mod parse;
mod repr;

pub use convert::{to_image, OPAQUE};

pub use parse::{
    parse_flat, parse_palette, parse_palettes, parse_patch, parse_patch_with,
    PatchOptions, PostDialect, END_OF_COLUMN, FLAT_SIDE, MAX_PICTURE_CELLS,
};

pub use repr::{Image, PaletteSet, PatchBitmap, PatchHeader, Pixel};

pub use crate::common::Palette;

/// Name of the lump holding the game palettes
pub const PALETTE_LUMP: &str = "PLAYPAL";
