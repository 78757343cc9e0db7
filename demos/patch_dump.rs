use wadpeek::lump::to_image;
use wadpeek::wad::Namespace;
use wadpeek::Archive;

use std::env::args;
use std::fs::{create_dir_all, read, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use png::{ColorType, Encoder};

fn main() {
    let mut arguments = args().skip(1);

    let wad_path = if let Some(wad_path) = arguments.next() {
        wad_path
    } else {
        panic!("No arguments");
    };

    let palette_index = arguments
        .next()
        .map(|idx| idx.parse::<usize>().expect("Bad palette index"))
        .unwrap_or(0);

    let bytes = read(wad_path).expect("Could not open file");
    let archive = Archive::from_bytes(bytes).unwrap();
    let palette = archive.decode_palette(palette_index).unwrap();

    for (position, entry) in archive.entries().iter().enumerate() {
        if entry.is_empty() {
            continue;
        }

        let bitmap = match archive.namespace(position) {
            Some(Namespace::Flats) => archive.decode_flat_entry(entry),
            Some(Namespace::Sprites | Namespace::Patches) => {
                archive.decode_patch_entry(entry)
            }
            _ => continue,
        };

        // Shadowed lumps keep their directory position in the file name
        let file_name = format!("{}.{}", entry.name(), position);

        match bitmap {
            Ok(bitmap) => {
                let image = to_image(&bitmap, &palette);
                println!("Writing {}...", file_name);
                write_png(
                    &file_name,
                    image.width(),
                    image.height(),
                    image.rgba(),
                );
            }
            Err(e) => eprintln!("Skipping: {}", e),
        }
    }
}

fn new_writer(file_name: &str) -> impl Write {
    let mut path = PathBuf::from("dump");
    create_dir_all(&path).unwrap();
    path.push(file_name);
    let file = File::create(path).unwrap();
    BufWriter::new(file)
}

fn write_png(name: &str, width: u32, height: u32, rgba: &[u8]) {
    if width == 0 || height == 0 {
        eprintln!("Empty image \"{}\"", name);
        return;
    }

    let writer = new_writer(&format!("{}.png", name));
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(rgba).unwrap();
}
