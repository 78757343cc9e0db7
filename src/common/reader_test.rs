use super::ByteReader;
use crate::error::{Error, ErrorKind};
use quickcheck_macros::quickcheck;
use std::vec::Vec;

#[test]
fn read_primitives() {
    let bytes = [
        0x7f, 0x34, 0x12, 0xfe, 0xff, 0x78, 0x56, 0x34, 0x12, 0xff, 0xff, 0xff,
        0xff,
    ];
    let mut reader = ByteReader::new(&bytes);

    assert_eq!(reader.read_u8().unwrap(), 0x7f);
    assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
    assert_eq!(reader.read_i16_le().unwrap(), -2);
    assert_eq!(reader.read_u32_le().unwrap(), 0x1234_5678);
    assert_eq!(reader.read_i32_le().unwrap(), -1);
    assert_eq!(reader.position(), bytes.len());
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn read_past_end() {
    let bytes = [1u8, 2, 3];
    let mut reader = ByteReader::new(&bytes);
    reader.read_u16_le().unwrap();

    let e = reader.read_u16_le().unwrap_err();

    assert_eq!(
        e,
        Error::OutOfBounds {
            offset: 2,
            length: 2,
            available: 3
        }
    );
    assert_eq!(reader.position(), 2);
    assert_eq!(reader.read_u8().unwrap(), 3);
}

#[test]
fn fixed_string_trims_at_nul() {
    let bytes = *b"PLAYPAL\0E1M1\0\0\0\0";
    let mut reader = ByteReader::new(&bytes);

    assert_eq!(reader.read_fixed_string(8).unwrap(), "PLAYPAL");
    assert_eq!(reader.read_fixed_string(8).unwrap(), "E1M1");
}

#[test]
fn fixed_string_without_terminator() {
    let bytes = *b"TROOA1A5";
    let mut reader = ByteReader::new(&bytes);

    assert_eq!(reader.read_fixed_string(8).unwrap(), "TROOA1A5");
}

#[test]
fn fixed_string_ignores_junk_after_nul() {
    let bytes = *b"SKY1\0\xAB\xCD\xEF";
    let mut reader = ByteReader::new(&bytes);

    assert_eq!(reader.read_fixed_string(8).unwrap(), "SKY1");
}

#[test]
fn slice_is_a_view() {
    let bytes = [0u8, 1, 2, 3, 4, 5];
    let reader = ByteReader::new(&bytes);
    let view = reader.slice(2, 3).unwrap();

    assert_eq!(view, &[2, 3, 4]);
    assert!(core::ptr::eq(view.as_ptr(), bytes[2..].as_ptr()));
    assert_eq!(reader.position(), 0);
    assert_eq!(&*reader.slice_owned(4, 2).unwrap(), &[4, 5]);
}

#[test]
fn slice_overflow_does_not_wrap() {
    let bytes = [0u8; 16];
    let reader = ByteReader::new(&bytes);

    let e = reader.slice(usize::MAX, 2).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::OutOfBounds);

    let e = reader.slice(8, 9).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::OutOfBounds);

    assert_eq!(reader.slice(16, 0).unwrap().len(), 0);
}

#[test]
fn seek_bounds() {
    let bytes = [0u8; 4];
    let mut reader = ByteReader::new(&bytes);

    reader.seek(4).unwrap();
    assert_eq!(reader.remaining(), 0);
    assert!(reader.seek(5).is_err());
    assert_eq!(ByteReader::at(&bytes, 2).unwrap().remaining(), 2);
}

#[quickcheck]
fn reads_never_exceed_buffer(data: Vec<u8>, widths: Vec<u8>) -> bool {
    let mut reader = ByteReader::new(&data);

    for width in widths {
        let before = reader.position();
        let ok = match width % 5 {
            0 => reader.read_u8().is_ok(),
            1 => reader.read_u16_le().is_ok(),
            2 => reader.read_i16_le().is_ok(),
            3 => reader.read_u32_le().is_ok(),
            _ => reader.read_fixed_string(usize::from(width)).is_ok(),
        };

        if !ok && reader.position() != before {
            return false;
        }

        if reader.position() > data.len() {
            return false;
        }
    }

    true
}
