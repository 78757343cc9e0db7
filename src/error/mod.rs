use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// Everything that can go wrong while reading an archive or decoding one of
/// its lumps
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Header tag is neither `IWAD` nor `PWAD`
    InvalidFormat { magic: [u8; 4] },
    /// Directory table does not fit in the archive
    TruncatedDirectory {
        entry_count: i32,
        directory_offset: i32,
        available: usize,
    },
    /// A read or slice ran past the end of its buffer
    OutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },
    /// Palette lump length is not a non-zero multiple of 768
    InvalidPaletteSize(usize),
    PaletteIndexOutOfRange { index: usize, count: usize },
    /// Flat lump is not 64x64 bytes
    InvalidFlatSize(usize),
    /// Picture lump is too short for its header and column table
    TruncatedHeader { needed: usize, available: usize },
    /// A column offset or post runs past the end of the picture lump
    TruncatedColumn { column: usize, offset: usize },
    /// A post writes outside of the picture's declared height
    MalformedColumn { column: usize, row: usize, height: u16 },
    /// Declared picture size is over the decoder's limit, or could not be
    /// allocated
    PictureTooLarge { width: u16, height: u16 },
    NotFound(String),
    /// Failure decoding a specific lump
    Lump { name: String, source: Box<Error> },
}

/// Fieldless mirror of [`Error`] for matching on the failure kind regardless
/// of which lump it came from
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    InvalidFormat,
    TruncatedDirectory,
    OutOfBounds,
    InvalidPaletteSize,
    PaletteIndexOutOfRange,
    InvalidFlatSize,
    TruncatedHeader,
    TruncatedColumn,
    MalformedColumn,
    PictureTooLarge,
    NotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Error::TruncatedDirectory { .. } => ErrorKind::TruncatedDirectory,
            Error::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Error::InvalidPaletteSize(_) => ErrorKind::InvalidPaletteSize,
            Error::PaletteIndexOutOfRange { .. } => {
                ErrorKind::PaletteIndexOutOfRange
            }
            Error::InvalidFlatSize(_) => ErrorKind::InvalidFlatSize,
            Error::TruncatedHeader { .. } => ErrorKind::TruncatedHeader,
            Error::TruncatedColumn { .. } => ErrorKind::TruncatedColumn,
            Error::MalformedColumn { .. } => ErrorKind::MalformedColumn,
            Error::PictureTooLarge { .. } => ErrorKind::PictureTooLarge,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Lump { source, .. } => source.kind(),
        }
    }

    /// Name of the lump the error was raised for, if known
    pub fn lump_name(&self) -> Option<&str> {
        match self {
            Error::Lump { name, .. } => Some(name.as_str()),
            Error::NotFound(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub(crate) fn in_lump(self, name: &str) -> Error {
        match self {
            wrapped @ Error::Lump { .. } => wrapped,
            not_found @ Error::NotFound(_) => not_found,
            source => Error::Lump {
                name: String::from(name),
                source: Box::new(source),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidFormat { magic } => {
                let tag: String =
                    magic.iter().copied().map(char::from).collect();
                write!(f, "Unrecognized archive tag `{}`", tag.escape_debug())
            }
            Error::TruncatedDirectory {
                entry_count,
                directory_offset,
                available,
            } => write!(
                f,
                "Directory of {entry_count} entries at offset \
                {directory_offset} does not fit in {available} bytes"
            ),
            Error::OutOfBounds {
                offset,
                length,
                available,
            } => write!(
                f,
                "Range {offset}..{} is outside of {available} bytes",
                offset.saturating_add(*length)
            ),
            Error::InvalidPaletteSize(size) => write!(
                f,
                "Palette lump of {size} bytes is not a multiple of 768"
            ),
            Error::PaletteIndexOutOfRange { index, count } => write!(
                f,
                "Palette {index} requested, but only {count} available"
            ),
            Error::InvalidFlatSize(size) => {
                write!(f, "Flat of {size} bytes is not 64x64")
            }
            Error::TruncatedHeader { needed, available } => write!(
                f,
                "Picture header needs {needed} bytes, lump has {available}"
            ),
            Error::TruncatedColumn { column, offset } => write!(
                f,
                "Column {column} runs past the end of the lump at {offset}"
            ),
            Error::MalformedColumn {
                column,
                row,
                height,
            } => write!(
                f,
                "Column {column} writes row {row} of a {height} row picture"
            ),
            Error::PictureTooLarge { width, height } => {
                write!(f, "Picture of {width}x{height} is too large to decode")
            }
            Error::NotFound(name) => write!(f, "No lump named `{name}`"),
            Error::Lump { name, source } => write!(f, "`{name}`: {source}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lump { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
