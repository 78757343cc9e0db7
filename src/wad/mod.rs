mod parse;
mod repr;

pub use parse::{classify_namespaces, parse_directory};
pub use repr::{
    Entry, Head, Namespace, WadKind, IWAD_MAGIC, NAME_LENGTH, PWAD_MAGIC,
};
