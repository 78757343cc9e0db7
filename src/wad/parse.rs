use crate::common::ByteReader;
use crate::error::{Error, Result};
use crate::wad::repr::{Entry, Head, Namespace, WadKind};
use alloc::vec::Vec;
use core::mem::size_of;

/// Decode the header and directory of an archive held in memory.  Entries are
/// returned in on-disk order.  Entries reaching past the end of `bytes` are
/// kept, and fail only when their lump is read.
pub fn parse_directory(bytes: &[u8]) -> Result<(Head, Vec<Entry>)> {
    let mut reader = ByteReader::new(bytes);

    if bytes.len() < size_of::<Head>() {
        // Report a bad tag ahead of a short header
        let magic = reader.read_array::<4>()?;
        WadKind::from_magic(magic).ok_or(Error::InvalidFormat { magic })?;
        return Err(truncated(None, bytes.len()));
    }

    let header_bytes = reader.read_array::<{ size_of::<Head>() }>()?;
    let header = Head::try_from(header_bytes)?;
    let truncated_dir = || truncated(Some(&header), bytes.len());

    let entry_ct =
        usize::try_from(header.entry_count()).map_err(|_| truncated_dir())?;
    let dir_offset = usize::try_from(header.directory_offset())
        .map_err(|_| truncated_dir())?;

    const WAD_ENTRY_SIZE: usize = size_of::<Entry>();

    let table = entry_ct
        .checked_mul(WAD_ENTRY_SIZE)
        .and_then(|table_len| reader.slice(dir_offset, table_len).ok())
        .ok_or_else(truncated_dir)?;

    let mut entries = Vec::with_capacity(entry_ct);

    for chunk in table.chunks_exact(WAD_ENTRY_SIZE) {
        let mut entry_bytes = [0u8; WAD_ENTRY_SIZE];
        entry_bytes.copy_from_slice(chunk);
        let entry = Entry::from(entry_bytes);

        if reader
            .slice(entry.offset() as usize, entry.size() as usize)
            .is_err()
        {
            log::warn!("Entry `{}` lies outside of the archive", entry.name());
        }

        entries.push(entry);
    }

    log::debug!(
        "Read {:?} directory of {} entries at offset {}",
        header.kind(),
        entries.len(),
        dir_offset
    );

    Ok((header, entries))
}

fn truncated(header: Option<&Head>, available: usize) -> Error {
    Error::TruncatedDirectory {
        entry_count: header.map_or(0, Head::entry_count),
        directory_offset: header.map_or(0, Head::directory_offset),
        available,
    }
}

/// Assign each entry to the namespace its enclosing markers describe.
/// Unbalanced markers are tolerated: a stray `*_END` drops back to the global
/// namespace and an unclosed `*_START` runs to the end of the directory.
pub fn classify_namespaces(entries: &[Entry]) -> Vec<Namespace> {
    let mut current = Namespace::Global;

    entries
        .iter()
        .map(|entry| match marker(&entry.name_bytes()) {
            Some(Marker::Start(namespace)) => {
                current = namespace;
                Namespace::Marker
            }
            Some(Marker::End) => {
                current = Namespace::Global;
                Namespace::Marker
            }
            Some(Marker::Nested) => Namespace::Marker,
            None => current,
        })
        .collect()
}

enum Marker {
    Start(Namespace),
    End,
    /// Numbered sub-markers (`P1_START`) inside an open namespace
    Nested,
}

fn marker(name: &[u8]) -> Option<Marker> {
    let len = name.iter().position(|&b| b == 0).unwrap_or(name.len());
    let name = &name[..len];

    let (prefix, is_start) = if let Some(p) = strip_suffix(name, b"_START") {
        (p, true)
    } else if let Some(p) = strip_suffix(name, b"_END") {
        (p, false)
    } else {
        return None;
    };

    let prefix: Vec<u8> = prefix.to_ascii_uppercase();

    let namespace = match &prefix[..] {
        b"S" | b"SS" => Namespace::Sprites,
        b"P" | b"PP" => Namespace::Patches,
        b"F" | b"FF" => Namespace::Flats,
        [b'P' | b'F', b'1'..=b'3'] => return Some(Marker::Nested),
        _ => return None,
    };

    Some(if is_start {
        Marker::Start(namespace)
    } else {
        Marker::End
    })
}

fn strip_suffix<'a>(name: &'a [u8], suffix: &[u8]) -> Option<&'a [u8]> {
    if name.len() < suffix.len() {
        return None;
    }

    let (head, tail) = name.split_at(name.len() - suffix.len());
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
