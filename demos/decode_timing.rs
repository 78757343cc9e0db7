#[cfg(feature = "std")]
mod main {

    use benchmarking::measure_function_with_times;
    use std::env::args;
    use std::fs::read;
    use std::time::Duration;

    use wadpeek::wad::Namespace;
    use wadpeek::Archive;

    fn decode_all(archive: &Archive, namespace: Namespace) -> usize {
        archive
            .decode_images(namespace, 0)
            .unwrap()
            .into_iter()
            .filter(|(_, image)| image.is_ok())
            .count()
    }

    fn measure_decode(bytes: &[u8], namespace: Namespace) -> Duration {
        let bytes = Vec::from(bytes);

        let results = measure_function_with_times(10, move |measurer| {
            let archive = Archive::from_bytes(bytes.clone()).unwrap();

            measurer.measure(|| {
                decode_all(&archive, namespace);
            });
        })
        .unwrap();

        results.elapsed()
    }

    pub fn run_benches() {
        let wad_path = if let Some(wad_path) = args().nth(1) {
            wad_path
        } else {
            panic!("No arguments");
        };

        let bytes = read(wad_path).expect("Could not open file");
        let archive = Archive::from_bytes(bytes.clone()).unwrap();

        for namespace in [Namespace::Sprites, Namespace::Patches, Namespace::Flats]
        {
            println!(
                "Took {:?} to decode {} {:?} lumps",
                measure_decode(&bytes, namespace),
                decode_all(&archive, namespace),
                namespace,
            );
        }
    }
}

#[cfg(not(feature = "std"))]
mod main {
    pub fn run_benches() {}
}

fn main() {
    main::run_benches();
}
