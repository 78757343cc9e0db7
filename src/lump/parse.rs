use crate::common::{ByteReader, Palette, PALETTE_SIZE};
use crate::error::{Error, Result};
use crate::lump::{PaletteSet, PatchBitmap, PatchHeader, Pixel};
use alloc::vec::Vec;
use core::mem::size_of;

/// Marks the end of a column's post stream
pub const END_OF_COLUMN: u8 = 0xFF;

/// Flats are raw 64x64 index buffers
pub const FLAT_SIDE: u16 = 64;

/// Largest picture, in cells, the decoder will allocate for.  Far above any
/// picture in shipped archives; a header over it is treated as corrupt.
pub const MAX_PICTURE_CELLS: usize = 4096 * 4096;

/// How post `topDelta` bytes are read
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum PostDialect {
    /// Absolute deltas, except that a delta not past the previous post's top
    /// is added to it ("tall" pictures taller than 254 rows), as long as
    /// the resulting run still fits in the picture
    #[default]
    Auto,
    /// Every delta is the absolute starting row
    Absolute,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PatchOptions {
    pub dialect: PostDialect,
}

/// Split a palette lump into 768-byte palettes
pub fn parse_palettes(bytes: &[u8]) -> Result<PaletteSet> {
    check_palette_size(bytes)?;

    let palettes: Vec<Palette> =
        bytes.chunks_exact(PALETTE_SIZE).map(read_palette).collect();

    Ok(PaletteSet::from_palettes(palettes.into_boxed_slice()))
}

/// Read only palette `index` of a palette lump.  The lump as a whole must
/// still be a valid size.
pub fn parse_palette(bytes: &[u8], index: usize) -> Result<Palette> {
    check_palette_size(bytes)?;

    let count = bytes.len() / PALETTE_SIZE;

    bytes
        .chunks_exact(PALETTE_SIZE)
        .nth(index)
        .map(read_palette)
        .ok_or(Error::PaletteIndexOutOfRange { index, count })
}

fn check_palette_size(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() || bytes.len() % PALETTE_SIZE != 0 {
        return Err(Error::InvalidPaletteSize(bytes.len()));
    }

    Ok(())
}

fn read_palette(chunk: &[u8]) -> Palette {
    let mut palette = [[0u8; 3]; 256];

    for (color, rgb) in palette.iter_mut().zip(chunk.chunks_exact(3)) {
        color.copy_from_slice(rgb);
    }

    palette
}

/// Decode a column-encoded picture lump with default options
pub fn parse_patch(bytes: &[u8]) -> Result<PatchBitmap> {
    parse_patch_with(bytes, PatchOptions::default())
}

/// Decode a column-encoded picture lump.  Column offsets are relative to the
/// start of `bytes`; posts must stay inside both the lump and the picture.
pub fn parse_patch_with(
    bytes: &[u8],
    options: PatchOptions,
) -> Result<PatchBitmap> {
    let header = PatchHeader::try_from(bytes)?;

    if header.cell_count() > MAX_PICTURE_CELLS {
        return Err(Error::PictureTooLarge {
            width: header.width(),
            height: header.height(),
        });
    }

    let table_end = header.table_end();

    if bytes.len() < table_end {
        return Err(Error::TruncatedHeader {
            needed: table_end,
            available: bytes.len(),
        });
    }

    let mut bitmap = PatchBitmap::blank(&header)?;
    let mut table = ByteReader::at(bytes, size_of::<PatchHeader>())?;

    for column in 0..usize::from(header.width()) {
        let offset = table.read_u32_le()? as usize;
        let decoder = ColumnDecoder {
            bytes,
            column,
            height: usize::from(header.height()),
            dialect: options.dialect,
        };

        decoder.decode(offset, &mut bitmap)?;
    }

    Ok(bitmap)
}

struct ColumnDecoder<'a> {
    bytes: &'a [u8],
    column: usize,
    height: usize,
    dialect: PostDialect,
}

impl<'a> ColumnDecoder<'a> {
    fn decode(&self, offset: usize, bitmap: &mut PatchBitmap) -> Result<()> {
        let mut reader = ByteReader::at(self.bytes, offset)
            .map_err(|_| self.truncated(offset))?;
        let mut previous_top = None;

        loop {
            let top_delta = self.read_u8(&mut reader)?;

            if top_delta == END_OF_COLUMN {
                return Ok(());
            }

            let length = usize::from(self.read_u8(&mut reader)?);
            self.read_u8(&mut reader)?;

            let run_start = reader.position();
            let run = reader
                .read_bytes(length)
                .map_err(|_| self.truncated(run_start))?;

            self.read_u8(&mut reader)?;

            let top = self.resolve_top(top_delta, previous_top, length);

            if length > 0 && top + length > self.height {
                return Err(Error::MalformedColumn {
                    column: self.column,
                    row: top.max(self.height),
                    height: self.height as u16,
                });
            }

            for (row, &index) in run.iter().enumerate() {
                bitmap.put(self.column, top + row, index);
            }

            previous_top = Some(top);
        }
    }

    fn resolve_top(
        &self,
        top_delta: u8,
        previous_top: Option<usize>,
        length: usize,
    ) -> usize {
        let delta = usize::from(top_delta);

        match (self.dialect, previous_top) {
            (PostDialect::Auto, Some(previous)) if delta <= previous => {
                let cumulative = previous + delta;

                if cumulative + length <= self.height {
                    log::trace!(
                        "Column {}: tall post at row {cumulative}",
                        self.column
                    );
                    cumulative
                } else {
                    delta
                }
            }
            _ => delta,
        }
    }

    fn read_u8(&self, reader: &mut ByteReader) -> Result<u8> {
        let position = reader.position();
        reader.read_u8().map_err(|_| self.truncated(position))
    }

    fn truncated(&self, offset: usize) -> Error {
        Error::TruncatedColumn {
            column: self.column,
            offset,
        }
    }
}

/// Read a raw 64x64 flat as a fully opaque bitmap
pub fn parse_flat(bytes: &[u8]) -> Result<PatchBitmap> {
    let side = usize::from(FLAT_SIDE);

    if bytes.len() != side * side {
        return Err(Error::InvalidFlatSize(bytes.len()));
    }

    let pixels: Vec<Pixel> = bytes.iter().copied().map(Pixel::Index).collect();

    Ok(PatchBitmap::from_pixels(
        FLAT_SIDE,
        FLAT_SIDE,
        pixels.into_boxed_slice(),
    ))
}
