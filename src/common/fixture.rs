//! Byte builders for archives and lumps used across the unit tests

use std::string::String;
use std::vec::Vec;

pub struct WadBuilder {
    magic: [u8; 4],
    lumps: Vec<(String, Vec<u8>)>,
}

impl WadBuilder {
    pub fn iwad() -> Self {
        Self {
            magic: *b"IWAD",
            lumps: Vec::new(),
        }
    }

    pub fn pwad() -> Self {
        Self {
            magic: *b"PWAD",
            lumps: Vec::new(),
        }
    }

    pub fn lump(mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.lumps.push((String::from(name), bytes.into()));
        self
    }

    pub fn marker(self, name: &str) -> Self {
        self.lump(name, Vec::new())
    }

    /// Header, then lump data in order, then the directory
    pub fn build(&self) -> Vec<u8> {
        let mut wad = Vec::new();
        let mut directory = Vec::new();

        wad.extend(self.magic);
        wad.extend(0i32.to_le_bytes());
        wad.extend(0i32.to_le_bytes());

        for (name, bytes) in &self.lumps {
            let offset = if bytes.is_empty() { 0 } else { wad.len() };
            directory.extend((offset as i32).to_le_bytes());
            directory.extend((bytes.len() as i32).to_le_bytes());
            directory.extend(name_bytes(name));
            wad.extend(bytes);
        }

        let directory_offset = wad.len() as i32;
        wad.extend(directory);
        wad[4..8].copy_from_slice(&(self.lumps.len() as i32).to_le_bytes());
        wad[8..12].copy_from_slice(&directory_offset.to_le_bytes());

        wad
    }
}

pub fn name_bytes(name: &str) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    bytes[..name.len()].copy_from_slice(name.as_bytes());
    bytes
}

/// `count` palettes where palette `n` maps index `i` to `[i, 255 - i, n]`
pub fn palette_bytes(count: u8) -> Vec<u8> {
    let mut bytes = Vec::new();

    for n in 0..count {
        for i in 0..=255u8 {
            bytes.extend([i, 255 - i, n]);
        }
    }

    bytes
}

/// A single post: starting row and its pixels
pub type Post = (u8, Vec<u8>);

/// Encode a picture lump.  Each column is written as its own post stream;
/// offsets are computed from the layout.
pub fn patch_bytes(
    width: u16,
    height: u16,
    left_offset: i16,
    top_offset: i16,
    columns: &[Vec<Post>],
) -> Vec<u8> {
    assert_eq!(usize::from(width), columns.len());

    let mut bytes = Vec::new();
    bytes.extend(width.to_le_bytes());
    bytes.extend(height.to_le_bytes());
    bytes.extend(left_offset.to_le_bytes());
    bytes.extend(top_offset.to_le_bytes());

    let table_start = bytes.len();
    bytes.extend(std::iter::repeat(0u8).take(4 * columns.len()));

    for (x, posts) in columns.iter().enumerate() {
        let offset = bytes.len() as u32;
        let slot = table_start + 4 * x;
        bytes[slot..slot + 4].copy_from_slice(&offset.to_le_bytes());

        for (top, pixels) in posts {
            bytes.push(*top);
            bytes.push(pixels.len() as u8);
            bytes.push(0);
            bytes.extend(pixels);
            bytes.push(0);
        }

        bytes.push(0xFF);
    }

    bytes
}
