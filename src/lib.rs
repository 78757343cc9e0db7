#![no_std]

#[cfg(all(not(feature = "std"), not(feature = "alloc_fills")))]
compile_error!("Must use feature 'std' or include 'alloc_fills'");

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
extern crate alloc;

pub mod archive;
pub mod common;
pub mod error;
pub mod lump;
pub mod sky;
pub mod wad;

pub use archive::Archive;

#[cfg(feature = "std")]
pub use archive::CachedArchive;

pub use common::{ByteReader, Palette};
pub use error::{
    Error as WadError, ErrorKind as WadErrorKind, Result as WadResult,
};
