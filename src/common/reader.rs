use crate::error::{Error, Result};
use alloc::boxed::Box;
use alloc::string::String;

/// Bounds-checked little-endian cursor over a borrowed byte buffer.  Reads
/// advance the cursor by the width of the value read; a failed read leaves
/// the cursor where it was.
#[derive(Clone, Copy, Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Reader positioned at `position`, which may be at most one past the end
    pub fn at(bytes: &'a [u8], position: usize) -> Result<Self> {
        let mut reader = Self::new(bytes);
        reader.seek(position)?;
        Ok(reader)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.bytes.len() {
            return Err(self.out_of_bounds(position, 0));
        }

        self.position = position;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_i16_le(&mut self) -> Result<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Read `length` bytes of NUL-padded ASCII, trimmed at the first NUL
    pub fn read_fixed_string(&mut self, length: usize) -> Result<String> {
        self.read_bytes(length).map(super::fixed_name)
    }

    /// Borrow the next `length` bytes and advance past them
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let bytes = self.slice(self.position, length)?;
        self.position += length;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// View of `length` bytes at absolute `offset`; the cursor is untouched
    pub fn slice(&self, offset: usize, length: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(length)
            .ok_or_else(|| self.out_of_bounds(offset, length))?;

        self.bytes
            .get(offset..end)
            .ok_or_else(|| self.out_of_bounds(offset, length))
    }

    /// Owned copy of [`ByteReader::slice`]
    pub fn slice_owned(&self, offset: usize, length: usize) -> Result<Box<[u8]>> {
        self.slice(offset, length).map(Box::from)
    }

    fn out_of_bounds(&self, offset: usize, length: usize) -> Error {
        Error::OutOfBounds {
            offset,
            length,
            available: self.bytes.len(),
        }
    }
}
