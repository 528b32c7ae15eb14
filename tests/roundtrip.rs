mod common;

use std::fs;
use std::io::Cursor;

use common::*;
use enough::Unstoppable;
use zenbmpio::*;

#[test]
fn greyscale_rows_are_flipped_upright() {
    // Disk order is bottom-up: [10, 20] is the visual bottom row.
    let body = disk_body(&[&[10, 20], &[30, 40]], 2, 0);
    let file = bmp_file(2, 2, 8, &[], &body);
    assert_eq!(parse_header_bytes(&file).data_offset, 54);

    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "flip.bmp", &file);

    let decoded = read_grey(&path, Unstoppable).unwrap();
    assert_eq!(decoded.width, 2);
    assert_eq!(decoded.height, 2);
    assert_eq!(decoded.layout, PixelLayout::Gray8);
    assert_eq!(decoded.pixels(), &[30, 40, 10, 20]);
    assert_eq!(decoded.row(0), Some(&[30u8, 40][..]));
    assert_eq!(decoded.row(1), Some(&[10u8, 20][..]));
    assert_eq!(decoded.row(2), None);
}

#[test]
fn rgb_triples_expand_to_opaque_rgba() {
    let file = bmp_file(1, 1, 24, &[], &[1, 2, 3, 0]);
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "one.bmp", &file);

    let decoded = read_rgb(&path, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgba8);
    assert_eq!(decoded.pixels(), &[1, 2, 3, 255]);
}

#[test]
fn rgba_collapses_to_triples_on_write() {
    let reference = bmp_file(1, 1, 24, &[], &[9, 9, 9, 0]);
    let dir = tempfile::tempdir().unwrap();
    let ref_path = write(dir.path(), "ref.bmp", &reference);
    let out_path = dir.path().join("out.bmp");

    write_rgb(&[1, 2, 3, 255], &out_path, 1, 1, &ref_path, Unstoppable).unwrap();

    let written = fs::read(&out_path).unwrap();
    assert_eq!(written.len(), 58);
    assert_eq!(&written[..54], &reference[..54]);
    assert_eq!(&written[54..57], &[1, 2, 3]);
    assert_eq!(written[57], 0, "padding must be zero");
}

#[test]
fn greyscale_roundtrip_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    for width in 1..=9 {
        let (file, _) = noise_bmp(width, 5, 8, width as u32);
        let path = write(dir.path(), "in.bmp", &file);
        let out_path = dir.path().join("out.bmp");

        let decoded = read_grey(&path, Unstoppable).unwrap();
        write_grey(
            decoded.pixels(),
            &out_path,
            decoded.height,
            decoded.width,
            &path,
            Unstoppable,
        )
        .unwrap();

        // Header and the 1024-byte palette ride along untouched.
        assert_eq!(fs::read(&out_path).unwrap(), file, "width {width}");
    }
}

#[test]
fn rgb_roundtrip_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    for width in 1..=9 {
        let (file, rows) = noise_bmp(width, 4, 24, 100 + width as u32);
        let path = write(dir.path(), "in.bmp", &file);
        let out_path = dir.path().join("out.bmp");

        let decoded = read_rgb(&path, Unstoppable).unwrap();
        // Top in-memory row is the last disk row.
        let top: Vec<u8> = decoded
            .row(0)
            .unwrap()
            .chunks_exact(4)
            .flat_map(|px| px[..3].to_vec())
            .collect();
        assert_eq!(top, rows[3]);

        write_rgb(
            decoded.pixels(),
            &out_path,
            decoded.height,
            decoded.width,
            &path,
            Unstoppable,
        )
        .unwrap();
        assert_eq!(fs::read(&out_path).unwrap(), file, "width {width}");
    }
}

#[test]
fn transformed_buffer_keeps_reference_header() {
    let (file, _) = noise_bmp(6, 3, 24, 42);
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "in.bmp", &file);
    let out_path = dir.path().join("inverted.bmp");

    let original = read_rgb(&path, Unstoppable).unwrap();
    let mut image = original.clone();
    for px in image.pixels_mut().chunks_exact_mut(4) {
        px[..3].iter_mut().for_each(|c| *c = 255 - *c);
    }
    write_buffer(
        &image,
        &out_path,
        &path,
        &BmpOptions::default(),
        Unstoppable,
    )
    .unwrap();

    let written = fs::read(&out_path).unwrap();
    assert_eq!(&written[..54], &file[..54]);
    assert_eq!(written.len(), file.len());

    let reread = read_rgb(&out_path, Unstoppable).unwrap();
    assert_eq!(reread, image);
    for (a, b) in reread.pixels().iter().zip(original.pixels()).skip(3).step_by(4) {
        assert_eq!((*a, *b), (255, 255), "alpha stays opaque");
    }
}

#[test]
fn stream_roundtrip_matches_file_roundtrip() {
    let (file, _) = noise_bmp(3, 7, 8, 7);

    let decoded = decode_grey(&mut Cursor::new(&file), &BmpOptions::default(), Unstoppable).unwrap();
    let mut out = Vec::new();
    encode_grey(
        decoded.pixels(),
        decoded.height,
        decoded.width,
        &mut Cursor::new(&file),
        &mut out,
        &BmpOptions::default(),
        Unstoppable,
    )
    .unwrap();
    assert_eq!(out, file);
}

#[test]
fn decoded_stream_serves_as_its_own_reference() {
    let (file, _) = noise_bmp(3, 3, 24, 13);
    let mut stream = Cursor::new(file.clone());

    let decoded = decode_rgb(&mut stream, &BmpOptions::default(), Unstoppable).unwrap();
    assert_ne!(stream.position(), 0);

    let mut out = Vec::new();
    encode_rgb(
        decoded.pixels(),
        decoded.height,
        decoded.width,
        &mut stream,
        &mut out,
        &BmpOptions::default(),
        Unstoppable,
    )
    .unwrap();
    assert_eq!(out, file);
}

#[test]
fn embedded_bitmap_decodes_from_its_own_start() {
    for bpp in [8, 24] {
        let (file, _) = noise_bmp(3, 3, bpp, 17);
        let mut container = vec![0xAA; 10];
        container.extend_from_slice(&file);
        container.extend_from_slice(&[0xBB; 7]);

        let decode = |stream: &mut Cursor<&[u8]>| {
            if bpp == 8 {
                decode_grey(stream, &BmpOptions::default(), Unstoppable)
            } else {
                decode_rgb(stream, &BmpOptions::default(), Unstoppable)
            }
        };
        let direct = decode(&mut Cursor::new(&file[..])).unwrap();

        let mut stream = Cursor::new(&container[..]);
        stream.set_position(10);
        let embedded = decode(&mut stream).unwrap();
        assert_eq!(embedded, direct, "{bpp}-bit");
    }
}

#[test]
fn missing_input_is_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.bmp");

    for result in [
        read_grey(&missing, Unstoppable),
        read_rgb(&missing, Unstoppable),
    ] {
        match result {
            Err(BitmapError::OpenFailure { role, path, .. }) => {
                assert_eq!(role, FileRole::Input);
                assert_eq!(path, missing);
            }
            other => panic!("expected OpenFailure, got {other:?}"),
        }
    }
    assert!(matches!(
        parse_header(&missing),
        Err(BitmapError::OpenFailure { .. })
    ));
}

#[test]
fn missing_reference_is_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.bmp");
    let out_path = dir.path().join("out.bmp");

    let err = write_grey(&[0; 4], &out_path, 2, 2, &missing, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::OpenFailure {
            role: FileRole::Reference,
            ..
        }
    ));
    let err = write_rgb(&[0; 16], &out_path, 2, 2, &missing, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::OpenFailure {
            role: FileRole::Reference,
            ..
        }
    ));
    assert!(!out_path.exists());
}

#[test]
fn unwritable_output_is_open_failure() {
    let file = bmp_file(1, 1, 8, &[], &[5, 0, 0, 0]);
    let dir = tempfile::tempdir().unwrap();
    let ref_path = write(dir.path(), "ref.bmp", &file);
    let out_path = dir.path().join("no-such-dir").join("out.bmp");

    let err = write_grey(&[5], &out_path, 1, 1, &ref_path, Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        BitmapError::OpenFailure {
            role: FileRole::Output,
            ..
        }
    ));
}

fn parse_header_bytes(file: &[u8]) -> BitmapHeader {
    BitmapHeader::parse(file).unwrap()
}
