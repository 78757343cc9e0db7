use alloc::string::String;
use core::mem::size_of;

use crate::common::{fixed_name, name_key, ByteReader};
use crate::error::{self, Error};

pub const IWAD_MAGIC: [u8; 4] = *b"IWAD";
pub const PWAD_MAGIC: [u8; 4] = *b"PWAD";

/// Bytes in a directory name
pub const NAME_LENGTH: usize = 8;

/// Whether an archive is a complete game (`IWAD`) or a patch to be loaded
/// over one (`PWAD`).  Both share the same layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WadKind {
    Internal,
    Patch,
}

impl WadKind {
    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        match magic {
            IWAD_MAGIC => Some(WadKind::Internal),
            PWAD_MAGIC => Some(WadKind::Patch),
            _ => None,
        }
    }

    pub fn magic(self) -> [u8; 4] {
        match self {
            WadKind::Internal => IWAD_MAGIC,
            WadKind::Patch => PWAD_MAGIC,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct Head {
    magic: [u8; 4],
    entry_count: i32,
    directory_offset: i32,
}

impl Head {
    pub fn new(kind: WadKind, entry_count: i32, directory_offset: i32) -> Self {
        Head {
            magic: kind.magic(),
            entry_count,
            directory_offset,
        }
    }

    pub fn kind(&self) -> WadKind {
        match WadKind::from_magic(self.magic) {
            Some(kind) => kind,
            None => unreachable!("Head is only built from a known tag"),
        }
    }

    pub fn entry_count(&self) -> i32 {
        self.entry_count
    }

    pub fn directory_offset(&self) -> i32 {
        self.directory_offset
    }
}

impl TryFrom<[u8; size_of::<Head>()]> for Head {
    type Error = Error;

    fn try_from(bytes: [u8; size_of::<Head>()]) -> error::Result<Self> {
        let mut reader = ByteReader::new(&bytes);
        let magic = reader.read_array::<4>()?;

        let kind =
            WadKind::from_magic(magic).ok_or(Error::InvalidFormat { magic })?;

        let entry_count = reader.read_i32_le()?;
        let directory_offset = reader.read_i32_le()?;

        Ok(Head::new(kind, entry_count, directory_offset))
    }
}

/// Location of a lump within a WAD archive, length of the lump, and its name
/// (8 bytes, NUL-padded)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct Entry {
    offset: u32,
    size: u32,
    name: [u8; NAME_LENGTH],
}

impl Entry {
    pub fn new(offset: u32, size: u32, name: [u8; NAME_LENGTH]) -> Self {
        Entry { offset, size, name }
    }

    /// Name as text, cut at the first NUL
    pub fn name(&self) -> String {
        fixed_name(&self.name)
    }

    /// Name in raw bytes
    pub fn name_bytes(&self) -> [u8; NAME_LENGTH] {
        self.name
    }

    /// Case-insensitive comparison against [`Entry::name`], so junk bytes
    /// match as `?` the same way archive lookups do
    pub fn name_matches(&self, name: &str) -> bool {
        name_key(&self.name()) == name_key(name)
    }

    /// Archive offset of the lump
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of the lump in bytes
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether the entry carries no data, as with namespace markers
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl From<[u8; size_of::<Entry>()]> for Entry {
    fn from(bytes: [u8; size_of::<Entry>()]) -> Self {
        let (offset, rest) = bytes.split_at(4);
        let (size, name) = rest.split_at(4);

        let mut offset_bytes = [0u8; 4];
        offset_bytes.copy_from_slice(offset);
        let mut size_bytes = [0u8; 4];
        size_bytes.copy_from_slice(size);
        let mut name_bytes = [0u8; NAME_LENGTH];
        name_bytes.copy_from_slice(name);

        Entry::new(
            u32::from_le_bytes(offset_bytes),
            u32::from_le_bytes(size_bytes),
            name_bytes,
        )
    }
}

/// Section of the directory an entry sits in, delimited by marker lumps
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Namespace {
    Global,
    /// `*_START` / `*_END` lumps themselves
    Marker,
    Sprites,
    Patches,
    Flats,
}
