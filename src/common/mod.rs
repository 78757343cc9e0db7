mod reader;

pub use reader::ByteReader;

/// 256 RGB colors, indexed by the bytes of a picture
pub type Palette = [[u8; 3]; 256];

/// Bytes in one palette
pub const PALETTE_SIZE: usize = core::mem::size_of::<Palette>();

/// Interpret a NUL-padded name as text, stopping at the first NUL.  Bytes
/// outside of ASCII are replaced rather than rejected; real archives contain
/// the occasional junk byte after the terminator, never before it.
pub fn fixed_name(slice: &[u8]) -> alloc::string::String {
    let len = slice.iter().position(|&b| b == 0).unwrap_or(slice.len());

    slice[..len]
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { '?' })
        .collect()
}

/// Case-folded lookup key for a lump name
pub fn name_key(name: &str) -> alloc::string::String {
    name.to_ascii_uppercase()
}

#[cfg(test)]
mod reader_test;

#[cfg(test)]
pub(crate) mod fixture;
