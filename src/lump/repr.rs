use crate::common::{ByteReader, Palette};
use crate::error::{self, Error};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem::size_of;

/// Every palette found in a palette lump, in lump order.  The first is the
/// normal game palette; the rest are usually damage and pickup tints.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PaletteSet {
    palettes: Box<[Palette]>,
}

impl PaletteSet {
    pub fn from_palettes(palettes: Box<[Palette]>) -> Self {
        Self { palettes }
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn get(&self, index: usize) -> error::Result<&Palette> {
        self.palettes
            .get(index)
            .ok_or(Error::PaletteIndexOutOfRange {
                index,
                count: self.palettes.len(),
            })
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes[..]
    }
}

impl<'a> IntoIterator for &'a PaletteSet {
    type Item = &'a Palette;
    type IntoIter = core::slice::Iter<'a, Palette>;

    fn into_iter(self) -> Self::IntoIter {
        self.palettes.iter()
    }
}

/// One decoded picture cell
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Pixel {
    #[default]
    Transparent,
    Index(u8),
}

impl Pixel {
    pub fn index(self) -> Option<u8> {
        match self {
            Pixel::Transparent => None,
            Pixel::Index(index) => Some(index),
        }
    }

    pub fn is_transparent(self) -> bool {
        self == Pixel::Transparent
    }
}

/// Fixed header at the start of a picture lump.  The column offset table
/// follows immediately.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct PatchHeader {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) left_offset: i16,
    pub(crate) top_offset: i16,
}

impl PatchHeader {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn left_offset(&self) -> i16 {
        self.left_offset
    }

    pub fn top_offset(&self) -> i16 {
        self.top_offset
    }

    /// Bytes taken by the header plus its column offset table
    pub fn table_end(&self) -> usize {
        size_of::<PatchHeader>() + size_of::<u32>() * usize::from(self.width)
    }

    /// Cells in the decoded picture
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl From<[u8; size_of::<PatchHeader>()]> for PatchHeader {
    fn from(bytes: [u8; size_of::<PatchHeader>()]) -> Self {
        let [w0, w1, h0, h1, l0, l1, t0, t1] = bytes;

        PatchHeader {
            width: u16::from_le_bytes([w0, w1]),
            height: u16::from_le_bytes([h0, h1]),
            left_offset: i16::from_le_bytes([l0, l1]),
            top_offset: i16::from_le_bytes([t0, t1]),
        }
    }
}

impl TryFrom<&[u8]> for PatchHeader {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> error::Result<Self> {
        let needed = size_of::<PatchHeader>();

        ByteReader::new(bytes)
            .read_array::<{ size_of::<PatchHeader>() }>()
            .map(PatchHeader::from)
            .map_err(|_| Error::TruncatedHeader {
                needed,
                available: bytes.len(),
            })
    }
}

/// Decoded picture: row-major cells, each either transparent or a palette
/// index.  Offsets are kept for sprite placement.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PatchBitmap {
    width: u16,
    height: u16,
    left_offset: i16,
    top_offset: i16,
    pixels: Box<[Pixel]>,
}

impl PatchBitmap {
    /// Fully transparent bitmap of the size given by `header`.  Fails rather
    /// than aborting when the pixels cannot be allocated.
    pub fn blank(header: &PatchHeader) -> error::Result<Self> {
        let pixel_ct = header.cell_count();
        let mut pixels = Vec::new();

        pixels.try_reserve_exact(pixel_ct).map_err(|_| {
            Error::PictureTooLarge {
                width: header.width(),
                height: header.height(),
            }
        })?;
        pixels.resize(pixel_ct, Pixel::Transparent);

        Ok(PatchBitmap {
            width: header.width(),
            height: header.height(),
            left_offset: header.left_offset(),
            top_offset: header.top_offset(),
            pixels: pixels.into_boxed_slice(),
        })
    }

    pub fn from_pixels(width: u16, height: u16, pixels: Box<[Pixel]>) -> Self {
        if pixels.len() != usize::from(width) * usize::from(height) {
            panic!("Pixel count != width * height");
        }

        PatchBitmap {
            width,
            height,
            left_offset: 0,
            top_offset: 0,
            pixels,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn left_offset(&self) -> i16 {
        self.left_offset
    }

    pub fn top_offset(&self) -> i16 {
        self.top_offset
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels[..]
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.cell(usize::from(x), usize::from(y))])
        } else {
            None
        }
    }

    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_transparent()).count()
    }

    pub(crate) fn put(&mut self, x: usize, y: usize, index: u8) {
        let cell = self.cell(x, y);
        self.pixels[cell] = Pixel::Index(index);
    }

    fn cell(&self, x: usize, y: usize) -> usize {
        y * usize::from(self.width) + x
    }
}

/// 8-bit RGBA pixels, row-major, ready for display or texturing
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Image {
    width: u32,
    height: u32,
    rgba: Box<[u8]>,
}

impl Image {
    pub const CHANNELS: usize = 4;

    pub fn from_rgba(width: u32, height: u32, rgba: Box<[u8]>) -> Self {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|ct| ct.checked_mul(Self::CHANNELS));

        if expected != Some(rgba.len()) {
            panic!("Byte count != width * height * 4");
        }

        Image {
            width,
            height,
            rgba,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba[..]
    }

    pub fn into_rgba(self) -> Box<[u8]> {
        self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let start = (y as usize * self.width as usize + x as usize)
            * Self::CHANNELS;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.rgba[start..start + Self::CHANNELS]);
        Some(rgba)
    }
}
