use super::{Archive, CacheConfig, CachedArchive};
use crate::common::fixture::{palette_bytes, patch_bytes, WadBuilder};
use crate::error::ErrorKind;
use crate::lump::Pixel;
use std::sync::Arc;
use std::vec::Vec;

fn archive_with(color: u8) -> Archive {
    let bytes = WadBuilder::pwad()
        .lump("PLAYPAL", palette_bytes(2))
        .lump("A", patch_bytes(1, 1, 0, 0, &[vec![(0, vec![color])]]))
        .lump("B", patch_bytes(1, 1, 0, 0, &[vec![(0, vec![color])]]))
        .lump("C", patch_bytes(1, 1, 0, 0, &[vec![(0, vec![color])]]))
        .lump("BROKEN", [1u8, 0, 1, 0])
        .build();

    Archive::from_bytes(bytes).unwrap()
}

#[test]
fn repeated_decode_hits_cache() {
    let cached = CachedArchive::new(archive_with(5));

    let first = cached.decode_patch("A").unwrap();
    let second = cached.decode_patch("a").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cached.cache().len(), 1);
}

#[test]
fn cached_image_matches_fresh_decode() {
    let cached = CachedArchive::new(archive_with(5));

    let image = cached.decode_image("A", 1).unwrap();
    let again = cached.decode_image("A", 1).unwrap();

    assert!(Arc::ptr_eq(&image, &again));
    assert_eq!(*image, cached.archive().decode_image("A", 1).unwrap());
    assert_eq!(image.pixel(0, 0), Some([5, 250, 1, 255]));

    // The bitmap and the image are cached separately
    assert_eq!(cached.cache().len(), 2);
}

#[test]
fn images_keyed_by_palette() {
    let cached = CachedArchive::new(archive_with(5));

    let first = cached.decode_image("A", 0).unwrap();
    let second = cached.decode_image("A", 1).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.pixel(0, 0), Some([5, 250, 0, 255]));
    assert_eq!(second.pixel(0, 0), Some([5, 250, 1, 255]));
}

#[test]
fn oldest_entry_evicted() {
    let config = CacheConfig { capacity: 2 };
    let cached = CachedArchive::with_config(archive_with(5), config);

    let a = cached.decode_patch("A").unwrap();
    cached.decode_patch("B").unwrap();
    cached.decode_patch("C").unwrap();

    assert_eq!(cached.cache().len(), 2);

    let a_again = cached.decode_patch("A").unwrap();
    assert!(!Arc::ptr_eq(&a, &a_again));
    assert_eq!(a, a_again);
}

#[test]
fn zero_capacity_disables_cache() {
    let config = CacheConfig { capacity: 0 };
    let cached = CachedArchive::with_config(archive_with(5), config);

    let first = cached.decode_patch("A").unwrap();
    let second = cached.decode_patch("A").unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(cached.cache().is_empty());
}

#[test]
fn failures_not_cached() {
    let cached = CachedArchive::new(archive_with(5));

    let e = cached.decode_patch("BROKEN").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::TruncatedHeader);
    let e = cached.decode_image("MISSING", 0).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::NotFound);
    assert!(cached.cache().is_empty());

    assert!(cached.decode_patch("A").is_ok());
    assert_eq!(cached.cache().len(), 1);
}

#[test]
fn replacing_archive_clears_cache() {
    let mut cached = CachedArchive::new(archive_with(5));

    let before = cached.decode_patch("A").unwrap();
    assert_eq!(before.pixel(0, 0), Some(Pixel::Index(5)));

    let old = cached.replace_archive(archive_with(9));
    assert!(cached.cache().is_empty());
    assert_eq!(old.decode_patch("A").unwrap(), *before);

    let after = cached.decode_patch("A").unwrap();
    assert_eq!(after.pixel(0, 0), Some(Pixel::Index(9)));
}

#[test]
fn concurrent_decodes_agree() {
    let cached = CachedArchive::with_config(
        archive_with(5),
        CacheConfig { capacity: 3 },
    );

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cached = &cached;
                let name = ["A", "B", "C"][i % 3];
                scope.spawn(move || cached.decode_image(name, i % 2).unwrap())
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, image) in results.iter().enumerate() {
        assert_eq!(image.pixel(0, 0), Some([5, 250, (i % 2) as u8, 255]));
    }

    assert!(cached.cache().len() <= 3);
}

#[test]
fn cached_archive_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CachedArchive>();
}
