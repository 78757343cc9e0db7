use crate::common::Palette;
use crate::lump::{Image, PatchBitmap, Pixel};
use alloc::vec::Vec;

/// Alpha written for opaque cells
pub const OPAQUE: u8 = 0xFF;

/// Map every cell of `bitmap` through `palette`.  Transparent cells become
/// `[0, 0, 0, 0]`.
pub fn to_image(bitmap: &PatchBitmap, palette: &Palette) -> Image {
    let mut rgba = Vec::with_capacity(bitmap.pixels().len() * Image::CHANNELS);

    for pixel in bitmap.pixels() {
        match *pixel {
            Pixel::Transparent => rgba.extend([0u8; 4]),
            Pixel::Index(index) => {
                let [r, g, b] = palette[usize::from(index)];
                rgba.extend([r, g, b, OPAQUE]);
            }
        }
    }

    Image::from_rgba(
        u32::from(bitmap.width()),
        u32::from(bitmap.height()),
        rgba.into_boxed_slice(),
    )
}
