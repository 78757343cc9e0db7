#[cfg(feature = "std")]
use wadpeek::{wad::Namespace, Archive};

#[cfg(feature = "std")]
use std::{env::args, fs::read};

#[cfg(feature = "std")]
fn main() {
    let mut arguments = args();

    let arg1 = if let Some(arg1) = arguments.nth(1) {
        arg1
    } else {
        panic!("No arguments");
    };

    let bytes = read(arg1).expect("Could not open file");
    let archive = Archive::from_bytes(bytes).unwrap();

    println!("{:?}, {} entries", archive.kind(), archive.entries().len());

    for (position, entry) in archive.entries().iter().enumerate() {
        let name = entry.name();
        print!("Entry `{}`: ", name);

        match archive.namespace(position) {
            Some(Namespace::Marker) => println!("Marker"),
            Some(Namespace::Flats) => match archive.decode_flat_entry(entry) {
                Ok(_) => println!("Flat"),
                Err(e) => println!("Bad flat ({e})"),
            },
            Some(Namespace::Sprites | Namespace::Patches) => {
                match archive.decode_patch_entry(entry) {
                    Ok(bitmap) => {
                        println!("Picture");
                        println!(
                            "\t{}x{} at ({}, {}): {} opaque pixels",
                            bitmap.width(),
                            bitmap.height(),
                            bitmap.left_offset(),
                            bitmap.top_offset(),
                            bitmap.opaque_count(),
                        );
                    }
                    Err(e) => println!("Bad picture ({e})"),
                }
            }
            _ => println!("Lump"),
        }

        println!("\t{} bytes at {}", entry.size(), entry.offset());
    }

    match archive.palettes() {
        Ok(palettes) => println!("{} palettes", palettes.len()),
        Err(e) => eprintln!("Warning: {e}"),
    }
}

#[cfg(not(feature = "std"))]
fn main() {}
