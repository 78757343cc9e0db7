#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

use crate::common::{name_key, ByteReader, Palette};
use crate::error::{Error, Result};
use crate::lump::{self, Image, PaletteSet, PatchBitmap, PatchOptions};
use crate::wad::{self, Entry, Head, Namespace, WadKind, NAME_LENGTH};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// A WAD archive held in memory, with its directory decoded.  Lumps are
/// decoded on request; nothing here is mutated after construction, so an
/// `Archive` can be shared between threads freely.
#[derive(Clone, Debug)]
pub struct Archive {
    bytes: Box<[u8]>,
    head: Head,
    entries: Vec<Entry>,
    namespaces: Vec<Namespace>,
    // Upper-cased name -> index of the last entry with that name
    index: HashMap<String, usize>,
    patch_options: PatchOptions,
}

impl Archive {
    /// Take ownership of an archive's bytes and decode its directory
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Result<Self> {
        let bytes = bytes.into();
        let (head, entries) = wad::parse_directory(&bytes)?;
        let namespaces = wad::classify_namespaces(&entries);
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            let name = entry.name();

            if index.insert(name_key(&name), position).is_some() {
                log::debug!("`{name}` at {position} shadows an earlier entry");
            }
        }

        Ok(Archive {
            bytes,
            head,
            entries,
            namespaces,
            index,
            patch_options: PatchOptions::default(),
        })
    }

    /// Use `options` for every picture decoded from this archive
    pub fn with_patch_options(mut self, options: PatchOptions) -> Self {
        self.patch_options = options;
        self
    }

    pub fn kind(&self) -> WadKind {
        self.head.kind()
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    /// The whole archive as loaded
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Every directory entry in on-disk order
    pub fn entries(&self) -> &[Entry] {
        &self.entries[..]
    }

    /// Namespace of the entry at `position` in the directory
    pub fn namespace(&self, position: usize) -> Option<Namespace> {
        self.namespaces.get(position).copied()
    }

    pub fn entries_in(
        &self,
        namespace: Namespace,
    ) -> impl Iterator<Item = &Entry> + '_ {
        self.entries
            .iter()
            .zip(&self.namespaces)
            .filter(move |(_, ns)| **ns == namespace)
            .map(|(entry, _)| entry)
    }

    /// Every entry called `name`, shadowed ones included, in directory order
    pub fn entries_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| e.name_matches(name))
    }

    /// Case-insensitive lookup.  When several entries share a name the last
    /// one wins, the way a later lump overrides an earlier one.
    pub fn find_lump(&self, name: &str) -> Result<&Entry> {
        if name.len() > NAME_LENGTH {
            return Err(Error::NotFound(String::from(name)));
        }

        self.index
            .get(&name_key(name))
            .map(|&position| &self.entries[position])
            .ok_or_else(|| Error::NotFound(String::from(name)))
    }

    /// View of the bytes of `entry`
    pub fn entry_bytes(&self, entry: &Entry) -> Result<&[u8]> {
        ByteReader::new(&self.bytes)
            .slice(entry.offset() as usize, entry.size() as usize)
            .map_err(|e| e.in_lump(&entry.name()))
    }

    pub fn lump_bytes(&self, name: &str) -> Result<&[u8]> {
        self.entry_bytes(self.find_lump(name)?)
    }

    /// Owned copy of a lump's bytes
    pub fn read_raw(&self, name: &str) -> Result<Box<[u8]>> {
        self.lump_bytes(name).map(Box::from)
    }

    /// Every palette in the palette lump
    pub fn palettes(&self) -> Result<PaletteSet> {
        let bytes = self.lump_bytes(lump::PALETTE_LUMP)?;
        lump::parse_palettes(bytes).map_err(|e| e.in_lump(lump::PALETTE_LUMP))
    }

    /// Palette `index`, read without decoding the others
    pub fn decode_palette(&self, index: usize) -> Result<Palette> {
        let bytes = self.lump_bytes(lump::PALETTE_LUMP)?;

        lump::parse_palette(bytes, index)
            .map_err(|e| e.in_lump(lump::PALETTE_LUMP))
    }

    pub fn decode_patch(&self, name: &str) -> Result<PatchBitmap> {
        self.decode_patch_entry(self.find_lump(name)?)
    }

    pub fn decode_patch_entry(&self, entry: &Entry) -> Result<PatchBitmap> {
        let bytes = self.entry_bytes(entry)?;

        lump::parse_patch_with(bytes, self.patch_options)
            .map_err(|e| e.in_lump(&entry.name()))
    }

    pub fn decode_flat(&self, name: &str) -> Result<PatchBitmap> {
        self.decode_flat_entry(self.find_lump(name)?)
    }

    pub fn decode_flat_entry(&self, entry: &Entry) -> Result<PatchBitmap> {
        let bytes = self.entry_bytes(entry)?;
        lump::parse_flat(bytes).map_err(|e| e.in_lump(&entry.name()))
    }

    /// Decode picture `name` and map it through palette `palette_index`
    pub fn decode_image(
        &self,
        name: &str,
        palette_index: usize,
    ) -> Result<Image> {
        let bitmap = self.decode_patch(name)?;
        let palette = self.decode_palette(palette_index)?;
        Ok(lump::to_image(&bitmap, &palette))
    }

    pub fn decode_flat_image(
        &self,
        name: &str,
        palette_index: usize,
    ) -> Result<Image> {
        let bitmap = self.decode_flat(name)?;
        let palette = self.decode_palette(palette_index)?;
        Ok(lump::to_image(&bitmap, &palette))
    }

    /// Decode every non-empty entry of `namespace` as an image.  Flats are
    /// read as flats and everything else as pictures.  Each entry gets its
    /// own result; only a missing or bad palette fails the whole batch.
    pub fn decode_images(
        &self,
        namespace: Namespace,
        palette_index: usize,
    ) -> Result<Vec<(String, Result<Image>)>> {
        let palette = self.decode_palette(palette_index)?;

        let images = self
            .entries_in(namespace)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let bitmap = match namespace {
                    Namespace::Flats => self.decode_flat_entry(entry),
                    _ => self.decode_patch_entry(entry),
                };

                let image = bitmap.map(|b| lump::to_image(&b, &palette));

                if let Err(e) = &image {
                    log::warn!("Failed to decode lump: {e}");
                }

                (entry.name(), image)
            })
            .collect();

        Ok(images)
    }
}
